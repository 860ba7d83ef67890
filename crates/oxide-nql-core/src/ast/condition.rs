//! Condition trees.

use core::fmt;

use serde::Serialize;

use super::query_value::{IntoQueryValue, QueryValue};
use crate::error::{QueryError, Result};
use crate::value::Value;

/// Condition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `=`
    Equals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqualsThan,
    /// `<`
    LesserThan,
    /// `<=`
    LesserEqualsThan,
    /// `like`
    Like,
    /// `in`
    In,
    /// `between`
    Between,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
}

impl Operator {
    /// Returns the operator as written in query text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::GreaterThan => ">",
            Self::GreaterEqualsThan => ">=",
            Self::LesserThan => "<",
            Self::LesserEqualsThan => "<=",
            Self::Like => "like",
            Self::In => "in",
            Self::Between => "between",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    /// Returns true for operators that compare a name with a single value.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::GreaterThan
                | Self::GreaterEqualsThan
                | Self::LesserThan
                | Self::LesserEqualsThan
                | Self::Like
        )
    }

    /// Returns true for operators that combine other conditions.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter condition.
///
/// The operand shape of every operator is part of the variant, so an `In`
/// always has a list operand, a `Between` always has two bounds and a
/// `Not` always wraps exactly one condition. The fallible constructors
/// enforce the remaining invariants (non-empty lists, comparison-only
/// operators in [`Condition::Compare`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// `name <op> value` for the comparison operators.
    Compare {
        /// Field name.
        name: String,
        /// One of the comparison operators.
        operator: Operator,
        /// Right-hand operand.
        value: QueryValue,
    },
    /// `name in (...)`.
    In {
        /// Field name.
        name: String,
        /// A non-empty list, or a parameter or sub-query producing one.
        values: QueryValue,
    },
    /// `name between low and high`.
    Between {
        /// Field name.
        name: String,
        /// Lower bound.
        low: QueryValue,
        /// Upper bound.
        high: QueryValue,
    },
    /// Conjunction of two or more conditions.
    And {
        /// Operands in declaration order.
        conditions: Vec<Condition>,
    },
    /// Disjunction of two or more conditions.
    Or {
        /// Operands in declaration order.
        conditions: Vec<Condition>,
    },
    /// Negation.
    Not {
        /// The negated condition.
        condition: Box<Condition>,
    },
}

impl Condition {
    fn comparison(name: impl Into<String>, operator: Operator, value: impl IntoQueryValue) -> Self {
        Self::Compare {
            name: name.into(),
            operator,
            value: value.into_query_value(),
        }
    }

    /// `name = value`
    #[must_use]
    pub fn eq(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::Equals, value)
    }

    /// `name > value`
    #[must_use]
    pub fn gt(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::GreaterThan, value)
    }

    /// `name >= value`
    #[must_use]
    pub fn gte(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::GreaterEqualsThan, value)
    }

    /// `name < value`
    #[must_use]
    pub fn lt(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::LesserThan, value)
    }

    /// `name <= value`
    #[must_use]
    pub fn lte(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::LesserEqualsThan, value)
    }

    /// `name like value`
    #[must_use]
    pub fn like(name: impl Into<String>, value: impl IntoQueryValue) -> Self {
        Self::comparison(name, Operator::Like, value)
    }

    /// Creates a comparison with an operator chosen at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `operator` is not a comparison
    /// operator.
    pub fn compare(
        name: impl Into<String>,
        operator: Operator,
        value: impl IntoQueryValue,
    ) -> Result<Self> {
        if !operator.is_comparison() {
            return Err(QueryError::Semantic(format!(
                "`{operator}` is not a comparison operator"
            )));
        }
        Ok(Self::comparison(name, operator, value))
    }

    /// `name in (v1, v2, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `values` is empty.
    pub fn in_list<V: IntoQueryValue>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values: Vec<QueryValue> = values
            .into_iter()
            .map(IntoQueryValue::into_query_value)
            .collect();
        Self::in_value(name, QueryValue::Array(values))
    }

    /// `name in value`, where `value` must produce a non-empty list.
    ///
    /// Parameters and sub-queries are accepted as-is; their contents are
    /// checked once bound.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `values` is an empty list or a
    /// scalar.
    pub fn in_value(name: impl Into<String>, values: QueryValue) -> Result<Self> {
        let name = name.into();
        let accepted = match &values {
            QueryValue::Parameter(_) | QueryValue::Statement(_) => true,
            QueryValue::Array(items) => !items.is_empty(),
            QueryValue::Literal(Value::Array(items)) => !items.is_empty(),
            QueryValue::Json(serde_json::Value::Array(items)) => !items.is_empty(),
            QueryValue::Literal(_) | QueryValue::Json(_) => false,
        };
        if !accepted {
            return Err(QueryError::Semantic(format!(
                "`in` on `{name}` requires a non-empty list of values"
            )));
        }
        Ok(Self::In { name, values })
    }

    /// `name between low and high`, from a list of exactly two bounds.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] unless `values` holds exactly two
    /// values.
    pub fn between<V: IntoQueryValue>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let name = name.into();
        let mut values = values.into_iter().map(IntoQueryValue::into_query_value);
        match (values.next(), values.next(), values.next()) {
            (Some(low), Some(high), None) => Ok(Self::Between { name, low, high }),
            _ => Err(QueryError::Semantic(format!(
                "`between` on `{name}` requires exactly two values"
            ))),
        }
    }

    /// Joins conditions with `and`. A single condition is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `conditions` is empty.
    pub fn and_all(conditions: impl IntoIterator<Item = Self>) -> Result<Self> {
        conditions
            .into_iter()
            .reduce(Self::and)
            .ok_or_else(|| QueryError::Semantic(String::from("`and` requires at least one condition")))
    }

    /// Joins conditions with `or`. A single condition is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `conditions` is empty.
    pub fn or_all(conditions: impl IntoIterator<Item = Self>) -> Result<Self> {
        conditions
            .into_iter()
            .reduce(Self::or)
            .ok_or_else(|| QueryError::Semantic(String::from("`or` requires at least one condition")))
    }

    /// `self and other`. Nested `and`s on either side are flattened.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut conditions = match self {
            Self::And { conditions } => conditions,
            condition => vec![condition],
        };
        match other {
            Self::And { conditions: rest } => conditions.extend(rest),
            condition => conditions.push(condition),
        }
        Self::And { conditions }
    }

    /// `self or other`. Nested `or`s on either side are flattened.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let mut conditions = match self {
            Self::Or { conditions } => conditions,
            condition => vec![condition],
        };
        match other {
            Self::Or { conditions: rest } => conditions.extend(rest),
            condition => conditions.push(condition),
        }
        Self::Or { conditions }
    }

    /// `not self`
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not {
            condition: Box::new(self),
        }
    }

    /// Returns the operator at the root of this condition.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Compare { operator, .. } => *operator,
            Self::In { .. } => Operator::In,
            Self::Between { .. } => Operator::Between,
            Self::And { .. } => Operator::And,
            Self::Or { .. } => Operator::Or,
            Self::Not { .. } => Operator::Not,
        }
    }

    /// Returns the field name of a leaf condition.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Compare { name, .. } | Self::In { name, .. } | Self::Between { name, .. } => {
                Some(name)
            }
            Self::And { .. } | Self::Or { .. } | Self::Not { .. } => None,
        }
    }

    /// Returns true if the tree contains `and`, `or` or `not`.
    #[must_use]
    pub const fn contains_logical(&self) -> bool {
        self.operator().is_logical()
    }

    /// Folds the tree bottom-up with `visitor`.
    pub fn fold<V: ConditionVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Compare {
                name,
                operator,
                value,
            } => visitor.compare(name, *operator, value),
            Self::In { name, values } => visitor.in_list(name, values),
            Self::Between { name, low, high } => visitor.between(name, low, high),
            Self::And { conditions } => {
                let children = conditions.iter().map(|c| c.fold(visitor)).collect();
                visitor.and(children)
            }
            Self::Or { conditions } => {
                let children = conditions.iter().map(|c| c.fold(visitor)).collect();
                visitor.or(children)
            }
            Self::Not { condition } => {
                let child = condition.fold(visitor);
                visitor.not(child)
            }
        }
    }
}

/// A bottom-up fold over a [`Condition`] tree.
///
/// Backends implement this to translate conditions into their native
/// filter representation.
pub trait ConditionVisitor {
    /// The translated form of a condition.
    type Output;

    /// Visits a comparison.
    fn compare(&mut self, name: &str, operator: Operator, value: &QueryValue) -> Self::Output;

    /// Visits an `in` condition.
    fn in_list(&mut self, name: &str, values: &QueryValue) -> Self::Output;

    /// Visits a `between` condition.
    fn between(&mut self, name: &str, low: &QueryValue, high: &QueryValue) -> Self::Output;

    /// Combines translated operands of an `and`.
    fn and(&mut self, children: Vec<Self::Output>) -> Self::Output;

    /// Combines translated operands of an `or`.
    fn or(&mut self, children: Vec<Self::Output>) -> Self::Output;

    /// Negates a translated condition.
    fn not(&mut self, child: Self::Output) -> Self::Output;
}
