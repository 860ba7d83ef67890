//! Operands of conditions, keys and payloads.

use serde::Serialize;

use super::statement::SelectStatement;
use crate::error::{QueryError, Result};
use crate::value::{ToValue, Value, ValueKind};

/// A value as written in a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryValue {
    /// A literal value.
    Literal(Value),
    /// A named parameter (`@name`), unresolved until bound.
    Parameter(String),
    /// A JSON document literal.
    Json(serde_json::Value),
    /// A list literal (`{a, b}` or `(a, b)` after `in`).
    Array(Vec<QueryValue>),
    /// A nested `select`.
    Statement(Box<SelectStatement>),
}

impl QueryValue {
    /// Creates a literal.
    ///
    /// Lists and JSON objects take the shape the parser gives them, so a
    /// value built in code compares equal to the same value read from
    /// text.
    #[must_use]
    pub fn literal(value: impl ToValue) -> Self {
        Self::from_value(value.to_value())
    }

    /// Wraps a runtime value in the shape query text would produce.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from_value).collect()),
            Value::Json(json) => match Value::from_json(json) {
                Value::Json(object) => Self::Json(object),
                other => Self::from_value(other),
            },
            scalar => Self::Literal(scalar),
        }
    }

    /// Creates a parameter reference.
    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    /// Returns true if this is a parameter reference.
    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// Returns the literal value, if this is a literal.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if reading this value would produce `kind`.
    ///
    /// An unresolved parameter answers `false` rather than failing, even
    /// though [`QueryValue::get`] on it does fail.
    #[must_use]
    pub fn is_instance_of(&self, kind: ValueKind) -> bool {
        match self {
            Self::Literal(value) => value.is_instance_of(kind),
            Self::Json(_) => kind == ValueKind::Json,
            Self::Array(_) => kind == ValueKind::Array,
            Self::Parameter(_) | Self::Statement(_) => false,
        }
    }

    /// Reads the runtime value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnresolvedParameter`] for a parameter and
    /// [`QueryError::Semantic`] for a nested statement, which has no value
    /// of its own.
    pub fn get(&self) -> Result<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Parameter(name) => Err(QueryError::UnresolvedParameter(name.clone())),
            Self::Json(json) => Ok(Value::Json(json.clone())),
            Self::Array(items) => items.iter().map(Self::get).collect::<Result<_>>().map(Value::Array),
            Self::Statement(_) => Err(QueryError::Semantic(String::from(
                "a nested select has no value outside its backend",
            ))),
        }
    }
}

/// Conversion into a [`QueryValue`].
///
/// Anything that converts to a [`Value`] becomes a literal; pass a
/// [`QueryValue`] (for instance from [`param`]) to use a parameter.
pub trait IntoQueryValue {
    /// Performs the conversion.
    fn into_query_value(self) -> QueryValue;
}

impl<T: ToValue> IntoQueryValue for T {
    fn into_query_value(self) -> QueryValue {
        QueryValue::literal(self)
    }
}

impl IntoQueryValue for QueryValue {
    fn into_query_value(self) -> QueryValue {
        self
    }
}

/// Shorthand for a parameter reference, usable wherever a value is taken.
#[must_use]
pub fn param(name: impl Into<String>) -> QueryValue {
    QueryValue::parameter(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_literal_and_array() {
        assert_eq!(QueryValue::literal(10).get().unwrap(), Value::Int(10));
        let array = QueryValue::Array(vec![QueryValue::literal(1), QueryValue::literal("a")]);
        assert_eq!(
            array.get().unwrap(),
            Value::Array(vec![Value::Int(1), Value::Text(String::from("a"))])
        );
    }

    #[test]
    fn test_get_unresolved_parameter_fails() {
        let err = param("id").get().unwrap_err();
        assert!(matches!(err, QueryError::UnresolvedParameter(name) if name == "id"));
    }

    #[test]
    fn test_is_instance_of_unresolved_parameter_is_false() {
        assert!(!param("id").is_instance_of(ValueKind::Int));
        assert!(QueryValue::literal(1).is_instance_of(ValueKind::Int));
        assert!(QueryValue::Json(serde_json::json!({})).is_instance_of(ValueKind::Json));
    }

    #[test]
    fn test_from_value_matches_parsed_shapes() {
        assert_eq!(
            QueryValue::literal(vec![1, 2]),
            QueryValue::Array(vec![QueryValue::Literal(Value::Int(1)), QueryValue::Literal(Value::Int(2))])
        );
        assert_eq!(
            QueryValue::literal(serde_json::json!([true, {"k": 1}])),
            QueryValue::Array(vec![
                QueryValue::Literal(Value::Bool(true)),
                QueryValue::Json(serde_json::json!({"k": 1})),
            ])
        );
        assert_eq!(
            QueryValue::from_value(Value::Json(serde_json::json!("a"))),
            QueryValue::Literal(Value::Text(String::from("a")))
        );
    }

    #[test]
    fn test_into_query_value() {
        assert_eq!("a".into_query_value(), QueryValue::literal("a"));
        assert!(param("x").into_query_value().is_parameter());
    }
}
