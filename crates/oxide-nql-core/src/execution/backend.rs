//! Backend traits.
//!
//! A backend receives fully bound statements and records. It may
//! translate conditions through [`crate::ast::ConditionVisitor`]; the core
//! never looks behind these traits.

use core::fmt;
use core::time::Duration;

use crate::ast::{DeleteStatement, SelectStatement, StatementKind};
use crate::entity::{Entity, KeyValue};
use crate::error::BackendError;
use crate::value::Value;

/// A lazy, pull-based sequence of backend results.
pub type ResultStream<T> = Box<dyn Iterator<Item = Result<T, BackendError>> + Send>;

/// A feature a statement may require from its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Expiry of written entries.
    Ttl,
    /// `order by`.
    Ordering,
    /// `skip` and `limit`.
    Pagination,
    /// `and`, `or` and `not` in filters.
    LogicalComposition,
    /// Statements of a given kind.
    Statement(StatementKind),
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ttl => f.write_str("time to live"),
            Self::Ordering => f.write_str("ordering"),
            Self::Pagination => f.write_str("pagination"),
            Self::LogicalComposition => f.write_str("logical composition"),
            Self::Statement(kind) => write!(f, "`{kind}` statements"),
        }
    }
}

/// The optional features a backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Supports expiry of written entries.
    pub ttl: bool,
    /// Supports `order by`.
    pub ordering: bool,
    /// Supports `skip` and `limit`.
    pub pagination: bool,
    /// Supports `and`, `or` and `not`.
    pub logical_composition: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            ttl: false,
            ordering: true,
            pagination: true,
            logical_composition: true,
        }
    }
}

impl Capabilities {
    /// Every capability.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            ttl: true,
            ordering: true,
            pagination: true,
            logical_composition: true,
        }
    }

    /// No optional capability.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            ttl: false,
            ordering: false,
            pagination: false,
            logical_composition: false,
        }
    }

    /// Sets TTL support.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: bool) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets ordering support.
    #[must_use]
    pub const fn with_ordering(mut self, ordering: bool) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets pagination support.
    #[must_use]
    pub const fn with_pagination(mut self, pagination: bool) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets support for logical composition.
    #[must_use]
    pub const fn with_logical_composition(mut self, logical_composition: bool) -> Self {
        self.logical_composition = logical_composition;
        self
    }

    /// Returns true if `capability` is supported.
    ///
    /// Statement kinds are not described here; they depend on the backend
    /// trait.
    #[must_use]
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Ttl => self.ttl,
            Capability::Ordering => self.ordering,
            Capability::Pagination => self.pagination,
            Capability::LogicalComposition => self.logical_composition,
            Capability::Statement(_) => false,
        }
    }
}

/// An entity (document, column, table) store.
pub trait DatabaseManager: Send + Sync {
    /// Returns the backend name, used in logs.
    fn name(&self) -> &str;

    /// Returns the optional features this backend supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Inserts an entity, expiring after `ttl` if given.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn insert(&self, entity: Entity, ttl: Option<Duration>) -> Result<Entity, BackendError>;

    /// Updates an entity.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn update(&self, entity: Entity) -> Result<Entity, BackendError>;

    /// Deletes matching entities, or fields of them, returning how many
    /// were affected when the backend knows.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn delete(&self, statement: &DeleteStatement) -> Result<Option<u64>, BackendError>;

    /// Streams matching entities.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn select(&self, statement: &SelectStatement) -> Result<ResultStream<Entity>, BackendError>;
}

/// A key-value store.
pub trait BucketManager: Send + Sync {
    /// Returns the backend name, used in logs.
    fn name(&self) -> &str;

    /// Returns the optional features this backend supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Stores a pair, expiring after `ttl` if given.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn put(&self, entry: KeyValue, ttl: Option<Duration>) -> Result<(), BackendError>;

    /// Streams the values stored under `keys`. Missing keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn get(&self, keys: &[Value]) -> Result<ResultStream<Value>, BackendError>;

    /// Removes `keys`.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error.
    fn delete(&self, keys: &[Value]) -> Result<(), BackendError>;
}
