//! Prepared statements.

use super::backend::{BucketManager, DatabaseManager, ResultStream};
use super::executor::{execute, execute_kv};
use super::result::ExecutionResult;
use crate::ast::Statement;
use crate::entity::Entity;
use crate::error::{QueryError, Result};
use crate::params::Params;
use crate::value::{ToValue, Value};

/// Lifecycle of a [`PreparedStatement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparedState {
    /// Some parameters have no value yet.
    Parsed,
    /// Every parameter has a value.
    Bound,
    /// Executed at least once.
    Executed,
}

/// A statement paired with its parameter slots.
///
/// Prepared statements are reusable by default: binding a parameter again
/// replaces its value and the statement can be executed any number of
/// times. A [single-use](PreparedStatement::single_use) statement binds
/// each parameter once and executes once.
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    statement: Statement,
    params: Params,
    reusable: bool,
    state: PreparedState,
}

impl PreparedStatement {
    /// Pairs a statement with the parameters registered while parsing it.
    #[must_use]
    pub fn new(statement: Statement, params: Params) -> Self {
        let mut prepared = Self {
            statement,
            params,
            reusable: true,
            state: PreparedState::Parsed,
        };
        prepared.refresh_state();
        prepared
    }

    /// Prepares a statement built in code, registering every parameter it
    /// references.
    #[must_use]
    pub fn from_statement(statement: Statement) -> Self {
        let mut params = Params::new();
        for name in statement.parameters() {
            params.add(name);
        }
        Self::new(statement, params)
    }

    /// Makes the statement single-use.
    #[must_use]
    pub fn single_use(mut self) -> Self {
        self.reusable = false;
        self
    }

    fn refresh_state(&mut self) {
        self.state = if self.params.ensure_resolved().is_ok() {
            PreparedState::Bound
        } else {
            PreparedState::Parsed
        };
    }

    /// Binds a parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameter`] for names the statement
    /// does not reference. A single-use statement also fails with
    /// [`QueryError::ParameterAlreadyBound`] when the parameter has a value
    /// and with [`QueryError::AlreadyExecuted`] after execution.
    pub fn bind(&mut self, name: &str, value: impl ToValue) -> Result<&mut Self> {
        if self.reusable {
            self.params.rebind(name, value)?;
        } else {
            if self.state == PreparedState::Executed {
                return Err(QueryError::AlreadyExecuted);
            }
            self.params.bind(name, value)?;
        }
        self.refresh_state();
        Ok(self)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PreparedState {
        self.state
    }

    /// Returns the prepared statement.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Returns the parameter slots.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns true unless the statement is single-use.
    #[must_use]
    pub const fn is_reusable(&self) -> bool {
        self.reusable
    }

    fn begin_execution(&self) -> Result<()> {
        if !self.reusable && self.state == PreparedState::Executed {
            return Err(QueryError::AlreadyExecuted);
        }
        self.params.ensure_resolved()
    }

    /// Executes against an entity backend.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::AlreadyExecuted`] for a spent single-use
    /// statement, [`QueryError::UnresolvedParameter`] before reaching the
    /// backend, and the errors of [`execute`].
    pub fn execute(&mut self, manager: &dyn DatabaseManager) -> Result<ExecutionResult<Entity>> {
        self.begin_execution()?;
        let result = execute(&self.statement, &self.params, manager)?;
        self.state = PreparedState::Executed;
        Ok(result)
    }

    /// Executes against a key-value backend.
    ///
    /// # Errors
    ///
    /// As [`PreparedStatement::execute`], with the errors of
    /// [`execute_kv`].
    pub fn execute_kv(&mut self, manager: &dyn BucketManager) -> Result<ExecutionResult<Value>> {
        self.begin_execution()?;
        let result = execute_kv(&self.statement, &self.params, manager)?;
        self.state = PreparedState::Executed;
        Ok(result)
    }

    /// Executes and collects every entity.
    ///
    /// # Errors
    ///
    /// As [`PreparedStatement::execute`], plus stream errors.
    pub fn result(&mut self, manager: &dyn DatabaseManager) -> Result<Vec<Entity>> {
        self.execute(manager)?.into_vec()
    }

    /// Executes and returns the entity stream.
    ///
    /// # Errors
    ///
    /// As [`PreparedStatement::execute`].
    pub fn stream(&mut self, manager: &dyn DatabaseManager) -> Result<ResultStream<Entity>> {
        Ok(self.execute(manager)?.into_stream())
    }

    /// Executes and returns at most one entity.
    ///
    /// # Errors
    ///
    /// As [`PreparedStatement::execute`], plus
    /// [`QueryError::NonUniqueResult`] for several matches.
    pub fn single_result(&mut self, manager: &dyn DatabaseManager) -> Result<Option<Entity>> {
        self.execute(manager)?.single_result()
    }
}
