//! # oxide-nql-core
//!
//! A small query language for NoSQL stores, with a type-safe builder and a
//! backend-neutral execution protocol.
//!
//! This crate provides:
//! - A hand-written recursive descent parser with Pratt parsing of `and`/`or`
//!   chains, covering entity statements (`select`, `insert`, `update`,
//!   `delete`) and key-value statements (`get`, `put`, `del`)
//! - A fluent builder using the typestate pattern
//! - Named `@parameters` bound before execution, never spliced into text
//! - Backend traits for entity and key-value stores, with capability checks
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_nql_core::{parse, Statement};
//!
//! let statement = parse("select * from Person where age > 10 and name = \"Diana\"").unwrap();
//! assert!(matches!(statement, Statement::Select(_)));
//! ```
//!
//! ## Type-Safe Building
//!
//! The builder produces the same statement as the equivalent text:
//!
//! ```rust
//! use oxide_nql_core::builder::select;
//! use oxide_nql_core::parse;
//!
//! let built = select(&[])
//!     .from("Person")
//!     .where_("age")
//!     .gt(10)
//!     .and("name")
//!     .eq("Diana")
//!     .build()
//!     .unwrap();
//! assert_eq!(built, parse("select * from Person where age > 10 and name = \"Diana\"").unwrap());
//!
//! // This would NOT compile:
//! // let query = select(&[]).from("Person").where_("age").build();
//! // Error: the predicate for `age` is missing
//! ```
//!
//! ## Parameters
//!
//! ```rust
//! use oxide_nql_core::prepare;
//!
//! let mut prepared = prepare("del @id").unwrap();
//! prepared.bind("id", 10).unwrap();
//! assert_eq!(prepared.statement().to_string(), "del @id");
//! ```

pub mod ast;
pub mod builder;
pub mod config;
pub mod entity;
pub mod error;
pub mod execution;
pub mod lexer;
pub mod params;
pub mod parser;
pub mod registry;
pub mod value;

use tracing::{debug, trace};

pub use ast::{param, Condition, Operator, QueryValue, Statement, StatementKind};
pub use builder::{delete, select};
pub use config::ProviderSettings;
pub use entity::{Element, Entity, FromEntity, KeyValue, ToEntity};
pub use error::{BackendError, QueryError, Result};
pub use execution::{
    execute, execute_kv, BucketManager, Capabilities, Capability, DatabaseManager,
    ExecutionResult, PreparedStatement,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use params::{ParamHandle, Params};
pub use parser::{Parser, SyntaxError};
pub use registry::ProviderRegistry;
pub use value::{ToValue, Value, ValueKind};

/// Parses a single statement.
///
/// # Errors
///
/// Returns [`QueryError::Syntax`] for malformed text and
/// [`QueryError::Semantic`] for well-formed text that breaks a statement
/// rule.
pub fn parse(text: &str) -> Result<Statement> {
    trace!(text, "parsing statement");
    let statement = Parser::new(text).parse_statement()?;
    debug!(kind = %statement.kind(), "parsed statement");
    Ok(statement)
}

/// Parses a single statement and prepares it for binding.
///
/// # Errors
///
/// As [`parse`].
pub fn prepare(text: &str) -> Result<PreparedStatement> {
    let mut parser = Parser::new(text);
    let statement = parser.parse_statement()?;
    Ok(PreparedStatement::new(statement, parser.into_params()))
}
