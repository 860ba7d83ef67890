//! Parameter discovery and resolution over statements.

use super::condition::{Condition, ConditionVisitor, Operator};
use super::query_value::QueryValue;
use super::statement::{
    DelStatement, DeleteStatement, GetStatement, InsertStatement, Payload, PutStatement,
    SelectStatement, Statement, UpdateStatement,
};
use crate::error::Result;
use crate::params::Params;

/// Collects parameter names in order of first appearance.
struct ParameterCollector<'a> {
    names: &'a mut Vec<String>,
}

impl ParameterCollector<'_> {
    fn value(&mut self, value: &QueryValue) {
        match value {
            QueryValue::Parameter(name) => {
                if !self.names.contains(name) {
                    self.names.push(name.clone());
                }
            }
            QueryValue::Array(items) => {
                for item in items {
                    self.value(item);
                }
            }
            QueryValue::Statement(select) => self.select(select),
            QueryValue::Literal(_) | QueryValue::Json(_) => {}
        }
    }

    fn condition(&mut self, condition: Option<&Condition>) {
        if let Some(condition) = condition {
            condition.fold(self);
        }
    }

    fn select(&mut self, select: &SelectStatement) {
        self.condition(select.condition.as_ref());
    }

    fn payload(&mut self, payload: &Payload) {
        match payload {
            Payload::Conditions(conditions) => {
                for condition in conditions {
                    condition.fold(self);
                }
            }
            Payload::Json(json) => self.value(json),
        }
    }
}

impl ConditionVisitor for ParameterCollector<'_> {
    type Output = ();

    fn compare(&mut self, _name: &str, _operator: Operator, value: &QueryValue) {
        self.value(value);
    }

    fn in_list(&mut self, _name: &str, values: &QueryValue) {
        self.value(values);
    }

    fn between(&mut self, _name: &str, low: &QueryValue, high: &QueryValue) {
        self.value(low);
        self.value(high);
    }

    fn and(&mut self, _children: Vec<()>) {}

    fn or(&mut self, _children: Vec<()>) {}

    fn not(&mut self, _child: ()) {}
}

/// Replaces parameters with their bound values.
struct Binder<'a> {
    params: &'a Params,
}

impl Binder<'_> {
    fn value(&self, value: &QueryValue) -> Result<QueryValue> {
        match value {
            QueryValue::Parameter(name) => {
                Ok(QueryValue::from_value(self.params.value(name)?.clone()))
            }
            QueryValue::Array(items) => items
                .iter()
                .map(|item| self.value(item))
                .collect::<Result<_>>()
                .map(QueryValue::Array),
            QueryValue::Statement(select) => Ok(QueryValue::Statement(Box::new(self.select(select)?))),
            QueryValue::Literal(_) | QueryValue::Json(_) => Ok(value.clone()),
        }
    }

    fn values(&self, values: &[QueryValue]) -> Result<Vec<QueryValue>> {
        values.iter().map(|value| self.value(value)).collect()
    }

    fn condition(&mut self, condition: Option<&Condition>) -> Result<Option<Condition>> {
        condition.map(|condition| condition.fold(self)).transpose()
    }

    fn select(&self, select: &SelectStatement) -> Result<SelectStatement> {
        let mut binder = Binder {
            params: self.params,
        };
        Ok(SelectStatement {
            condition: binder.condition(select.condition.as_ref())?,
            ..select.clone()
        })
    }

    fn payload(&mut self, payload: &Payload) -> Result<Payload> {
        match payload {
            Payload::Conditions(conditions) => conditions
                .iter()
                .map(|condition| condition.fold(self))
                .collect::<Result<_>>()
                .map(Payload::Conditions),
            Payload::Json(json) => Ok(Payload::Json(self.value(json)?)),
        }
    }
}

impl ConditionVisitor for Binder<'_> {
    type Output = Result<Condition>;

    fn compare(&mut self, name: &str, operator: Operator, value: &QueryValue) -> Result<Condition> {
        Ok(Condition::Compare {
            name: String::from(name),
            operator,
            value: self.value(value)?,
        })
    }

    fn in_list(&mut self, name: &str, values: &QueryValue) -> Result<Condition> {
        Condition::in_value(name, self.value(values)?)
    }

    fn between(&mut self, name: &str, low: &QueryValue, high: &QueryValue) -> Result<Condition> {
        Ok(Condition::Between {
            name: String::from(name),
            low: self.value(low)?,
            high: self.value(high)?,
        })
    }

    fn and(&mut self, children: Vec<Result<Condition>>) -> Result<Condition> {
        Ok(Condition::And {
            conditions: children.into_iter().collect::<Result<_>>()?,
        })
    }

    fn or(&mut self, children: Vec<Result<Condition>>) -> Result<Condition> {
        Ok(Condition::Or {
            conditions: children.into_iter().collect::<Result<_>>()?,
        })
    }

    fn not(&mut self, child: Result<Condition>) -> Result<Condition> {
        Ok(child?.negate())
    }
}

impl Statement {
    /// Returns the names of all parameters, in order of first appearance.
    #[must_use]
    pub fn parameters(&self) -> Vec<String> {
        let mut names = vec![];
        let mut collector = ParameterCollector { names: &mut names };
        match self {
            Self::Select(select) => collector.select(select),
            Self::Delete(delete) => collector.condition(delete.condition.as_ref()),
            Self::Insert(insert) => collector.payload(&insert.payload),
            Self::Update(update) => collector.payload(&update.payload),
            Self::Get(GetStatement { keys }) | Self::Del(DelStatement { keys }) => {
                for key in keys {
                    collector.value(key);
                }
            }
            Self::Put(put) => {
                collector.value(&put.key);
                collector.value(&put.value);
            }
        }
        names
    }

    /// Returns a copy of the statement with every parameter replaced by
    /// its bound value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QueryError::UnresolvedParameter`] if a parameter
    /// has no value in `params`, and [`crate::QueryError::Semantic`] if an
    /// `in` parameter is not bound to a non-empty list.
    pub fn bind(&self, params: &Params) -> Result<Self> {
        let mut binder = Binder { params };
        Ok(match self {
            Self::Select(select) => Self::Select(binder.select(select)?),
            Self::Delete(delete) => Self::Delete(DeleteStatement {
                condition: binder.condition(delete.condition.as_ref())?,
                ..delete.clone()
            }),
            Self::Insert(insert) => Self::Insert(InsertStatement {
                entity: insert.entity.clone(),
                payload: binder.payload(&insert.payload)?,
                ttl: insert.ttl,
            }),
            Self::Update(update) => Self::Update(UpdateStatement {
                entity: update.entity.clone(),
                payload: binder.payload(&update.payload)?,
            }),
            Self::Get(get) => Self::Get(GetStatement {
                keys: binder.values(&get.keys)?,
            }),
            Self::Put(put) => Self::Put(PutStatement {
                key: binder.value(&put.key)?,
                value: binder.value(&put.value)?,
                ttl: put.ttl,
            }),
            Self::Del(del) => Self::Del(DelStatement {
                keys: binder.values(&del.keys)?,
            }),
        })
    }
}
