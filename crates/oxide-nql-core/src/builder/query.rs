//! The shared builder type and the transitions common to every statement.

use std::marker::PhantomData;

use super::condition::ConditionDraft;
use super::state::{
    sealed, HasFrom, HasWhere, NameCondition, NoFrom, NotCondition, PredicateState, Terminal,
};
use crate::ast::{Condition, IntoQueryValue, Operator, QueryValue, Statement};
use crate::entity::Entity;
use crate::error::{QueryError, Result};
use crate::execution::{execute, DatabaseManager, ExecutionResult, PreparedStatement};
use crate::params::Params;

/// A statement kind the builder can assemble.
pub trait Draft: sealed::Sealed {
    /// Assembles the statement from the parts shared by every kind.
    fn assemble(self, entity: String, fields: Vec<String>, condition: Option<Condition>) -> Statement;
}

/// A fluent statement builder.
///
/// `K` is the statement kind ([`Select`](super::Select) or
/// [`Delete`](super::Delete)) and `S` a typestate marker: each method is
/// only available in the states where the clause it adds is legal, so an
/// incomplete chain cannot be built.
///
/// Invalid arguments such as empty names do not panic. The first one is
/// recorded and returned by the terminal operation.
pub struct QueryBuilder<K, S> {
    pub(crate) kind: K,
    entity: String,
    fields: Vec<String>,
    conditions: ConditionDraft,
    error: Option<QueryError>,
    _state: PhantomData<S>,
}

impl<K: Draft> QueryBuilder<K, NoFrom> {
    pub(crate) fn with_fields(kind: K, fields: &[&str]) -> Self {
        let mut builder = Self {
            kind,
            entity: String::new(),
            fields: fields.iter().map(|f| String::from(*f)).collect(),
            conditions: ConditionDraft::default(),
            error: None,
            _state: PhantomData,
        };
        if builder.fields.iter().any(String::is_empty) {
            builder.fail(empty_name("projected field"));
        }
        builder
    }

    /// Specifies the entity the statement targets.
    #[must_use]
    pub fn from(mut self, entity: &str) -> QueryBuilder<K, HasFrom> {
        if entity.is_empty() {
            self.fail(empty_name("entity"));
        }
        self.entity = String::from(entity);
        self.transition()
    }
}

impl<K, S> QueryBuilder<K, S> {
    pub(crate) fn transition<T>(self) -> QueryBuilder<K, T> {
        QueryBuilder {
            kind: self.kind,
            entity: self.entity,
            fields: self.fields,
            conditions: self.conditions,
            error: self.error,
            _state: PhantomData,
        }
    }

    /// Records `error` unless an earlier one is pending.
    pub(crate) fn fail(&mut self, error: QueryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn check_name(&mut self, what: &str, name: &str) {
        if name.is_empty() {
            self.fail(empty_name(what));
        }
    }

    fn start_condition(mut self, name: &str, connective: Operator) -> QueryBuilder<K, NameCondition> {
        self.check_name("condition field", name);
        self.conditions.start(String::from(name), connective);
        self.transition()
    }
}

fn empty_name(what: &str) -> QueryError {
    QueryError::PreconditionViolation(format!("{what} name must not be empty"))
}

impl<K> QueryBuilder<K, HasFrom> {
    /// Starts the filter with a condition on `name`.
    #[must_use]
    pub fn where_(self, name: &str) -> QueryBuilder<K, NameCondition> {
        self.start_condition(name, Operator::And)
    }
}

impl<K> QueryBuilder<K, HasWhere> {
    /// Adds a condition on `name`, joined with `and`.
    #[must_use]
    pub fn and(self, name: &str) -> QueryBuilder<K, NameCondition> {
        self.start_condition(name, Operator::And)
    }

    /// Adds a condition on `name`, joined with `or`.
    #[must_use]
    pub fn or(self, name: &str) -> QueryBuilder<K, NameCondition> {
        self.start_condition(name, Operator::Or)
    }
}

impl<K> QueryBuilder<K, NameCondition> {
    /// Negates the predicate that follows.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> QueryBuilder<K, NotCondition> {
        self.conditions.negate();
        self.transition()
    }
}

// Predicates: NameCondition | NotCondition -> HasWhere
impl<K, S: PredicateState> QueryBuilder<K, S> {
    fn predicate(
        mut self,
        make: impl FnOnce(String) -> Result<Condition>,
    ) -> QueryBuilder<K, HasWhere> {
        if let Err(e) = self.conditions.complete(make) {
            self.fail(e);
        }
        self.transition()
    }

    /// `name = value`
    #[must_use]
    pub fn eq(self, value: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::eq(name, value)))
    }

    /// `name > value`
    #[must_use]
    pub fn gt(self, value: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::gt(name, value)))
    }

    /// `name >= value`
    #[must_use]
    pub fn gte(self, value: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::gte(name, value)))
    }

    /// `name < value`
    #[must_use]
    pub fn lt(self, value: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::lt(name, value)))
    }

    /// `name <= value`
    #[must_use]
    pub fn lte(self, value: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::lte(name, value)))
    }

    /// `name like pattern`
    #[must_use]
    pub fn like(self, pattern: impl IntoQueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Ok(Condition::like(name, pattern)))
    }

    /// `name between low and high`
    #[must_use]
    pub fn between(
        self,
        low: impl IntoQueryValue,
        high: impl IntoQueryValue,
    ) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| {
            Condition::between(name, [low.into_query_value(), high.into_query_value()])
        })
    }

    /// `name in (v1, v2, ...)`. An empty list is reported by the terminal
    /// operation.
    #[must_use]
    pub fn in_<V: IntoQueryValue>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Condition::in_list(name, values))
    }

    /// `name in values`, for a parameter or sub-query producing the list.
    #[must_use]
    pub fn in_value(self, values: QueryValue) -> QueryBuilder<K, HasWhere> {
        self.predicate(|name| Condition::in_value(name, values))
    }
}

// Terminals
impl<K: Draft, S: Terminal<K>> QueryBuilder<K, S> {
    /// Builds the statement.
    ///
    /// # Errors
    ///
    /// Returns the first invalid argument given to the chain:
    /// [`QueryError::PreconditionViolation`] for empty names and
    /// [`QueryError::Semantic`] for invalid predicate values.
    pub fn build(self) -> Result<Statement> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let condition = self.conditions.finish();
        Ok(self.kind.assemble(self.entity, self.fields, condition))
    }

    /// Builds the statement as a prepared statement, so parameters used in
    /// the chain can be bound before execution.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::build`].
    pub fn prepare(self) -> Result<PreparedStatement> {
        Ok(PreparedStatement::from_statement(self.build()?))
    }

    /// Builds and executes the statement.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::build`], plus the errors of
    /// [`execute`](crate::execution::execute). Parameters used in the chain
    /// are unresolved here; use [`QueryBuilder::prepare`] to bind them.
    pub fn execute(self, manager: &dyn DatabaseManager) -> Result<ExecutionResult<Entity>> {
        execute(&self.build()?, &Params::new(), manager)
    }
}
