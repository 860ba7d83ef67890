//! Type-guided statement builders.
//!
//! Chains start with [`select`] or [`delete`] and use the typestate pattern
//! so that only legal continuations are offered at each step:
//! - `build()` is only available once the entity is specified and every
//!   field name has its predicate
//! - ordering and paging are only offered on `select` chains
//! - `asc()`/`desc()` must follow `order_by()`
//!
//! Chains fold `and`/`or` with the precedence of query text, so a chain
//! builds the same statement as the equivalent text.

mod condition;
mod delete;
mod query;
mod select;
mod state;

pub use delete::{delete, Delete};
pub use query::{Draft, QueryBuilder};
pub use select::{select, Select};
pub use state::{
    HasFrom, HasLimit, HasOrder, HasPaging, HasSkip, HasWhere, NameCondition, NameOrder, NoFrom,
    NotCondition, Orderable, PredicateState, Terminal,
};
