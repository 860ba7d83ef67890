//! `delete` chains.

use super::query::{Draft, QueryBuilder};
use super::state::NoFrom;
use crate::ast::{Condition, DeleteStatement, Statement};

/// The `delete` statement kind.
#[derive(Debug, Default)]
pub struct Delete;

impl Draft for Delete {
    fn assemble(self, entity: String, fields: Vec<String>, condition: Option<Condition>) -> Statement {
        Statement::Delete(DeleteStatement {
            entity,
            fields,
            condition,
        })
    }
}

/// Starts a `delete` of `fields`; an empty slice deletes whole entities.
///
/// **Warning**: without a `where_` clause every entity is deleted.
#[must_use]
pub fn delete(fields: &[&str]) -> QueryBuilder<Delete, NoFrom> {
    QueryBuilder::with_fields(Delete, fields)
}
