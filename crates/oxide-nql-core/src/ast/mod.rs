//! Abstract Syntax Tree (AST) types for query statements.
//!
//! The AST is plain data: parsed text and builder chains both produce it,
//! backends consume it once parameters are bound.

mod bind;
mod condition;
mod display;
mod query_value;
mod statement;

pub use condition::{Condition, ConditionVisitor, Operator};
pub use query_value::{param, IntoQueryValue, QueryValue};
pub use statement::{
    DelStatement, DeleteStatement, GetStatement, InsertStatement, Payload, PutStatement,
    SelectStatement, Sort, SortDirection, Statement, StatementKind, UpdateStatement,
};
