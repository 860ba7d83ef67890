//! Accumulation of `where` chains.

use crate::ast::{Condition, ConditionVisitor, Operator, QueryValue};
use crate::error::{QueryError, Result};
use crate::value::Value;

#[derive(Debug)]
struct Pending {
    name: String,
    connective: Operator,
    negate: bool,
}

/// Collects predicates as they are chained and folds them like the parser.
///
/// Predicates joined by `and` share a group; `or` opens a new group. The
/// groups are joined with `or` when the chain is finished, so `and` binds
/// tighter than `or`.
#[derive(Debug, Default)]
pub(crate) struct ConditionDraft {
    groups: Vec<Vec<Condition>>,
    pending: Option<Pending>,
}

impl ConditionDraft {
    /// Starts a predicate on `name`, joined to the chain by `connective`.
    pub(crate) fn start(&mut self, name: String, connective: Operator) {
        self.pending = Some(Pending {
            name,
            connective,
            negate: false,
        });
    }

    pub(crate) fn negate(&mut self) {
        if let Some(pending) = &mut self.pending {
            pending.negate = !pending.negate;
        }
    }

    /// Completes the pending predicate.
    pub(crate) fn complete(
        &mut self,
        make: impl FnOnce(String) -> Result<Condition>,
    ) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Err(QueryError::PreconditionViolation(String::from(
                "no field name awaits a predicate",
            )));
        };
        let mut condition = make(pending.name)?;
        if !condition.fold(&mut FiniteNumbers) {
            return Err(QueryError::PreconditionViolation(String::from(
                "numbers in a query must be finite",
            )));
        }
        if pending.negate {
            condition = condition.negate();
        }
        match (pending.connective, self.groups.last_mut()) {
            (Operator::And, Some(group)) => group.push(condition),
            _ => self.groups.push(vec![condition]),
        }
        Ok(())
    }

    /// Folds the chain into its root condition.
    pub(crate) fn finish(self) -> Option<Condition> {
        self.groups
            .into_iter()
            .filter_map(|group| group.into_iter().reduce(Condition::and))
            .reduce(Condition::or)
    }
}

/// True when every number in a condition is finite and so has a textual
/// form.
struct FiniteNumbers;

fn is_finite(value: &QueryValue) -> bool {
    fn finite(value: &Value) -> bool {
        match value {
            Value::Float(x) => x.is_finite(),
            Value::Array(items) => items.iter().all(finite),
            _ => true,
        }
    }

    match value {
        QueryValue::Literal(value) => finite(value),
        QueryValue::Array(items) => items.iter().all(is_finite),
        QueryValue::Parameter(_) | QueryValue::Json(_) | QueryValue::Statement(_) => true,
    }
}

impl ConditionVisitor for FiniteNumbers {
    type Output = bool;

    fn compare(&mut self, _name: &str, _operator: Operator, value: &QueryValue) -> bool {
        is_finite(value)
    }

    fn in_list(&mut self, _name: &str, values: &QueryValue) -> bool {
        is_finite(values)
    }

    fn between(&mut self, _name: &str, low: &QueryValue, high: &QueryValue) -> bool {
        is_finite(low) && is_finite(high)
    }

    fn and(&mut self, children: Vec<bool>) -> bool {
        children.into_iter().all(|ok| ok)
    }

    fn or(&mut self, children: Vec<bool>) -> bool {
        children.into_iter().all(|ok| ok)
    }

    fn not(&mut self, child: bool) -> bool {
        child
    }
}
