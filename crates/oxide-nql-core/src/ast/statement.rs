//! Statement AST types.

use core::fmt;
use core::time::Duration;

use serde::Serialize;

use super::condition::Condition;
use super::query_value::QueryValue;
use crate::error::{QueryError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the direction keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// An `order by` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    /// The field to sort on.
    pub name: String,
    /// The direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `name`.
    #[must_use]
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `name`.
    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A `select` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    /// The entity to read from.
    pub entity: String,
    /// Projected fields; empty means all fields.
    pub fields: Vec<String>,
    /// Root filter condition.
    pub condition: Option<Condition>,
    /// Ordering, in declaration order.
    pub sorts: Vec<Sort>,
    /// Number of matches to skip.
    pub skip: u64,
    /// Maximum number of results; zero means unbounded.
    pub limit: u64,
}

impl SelectStatement {
    /// Creates an unfiltered select of every field of `entity`.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: vec![],
            condition: None,
            sorts: vec![],
            skip: 0,
            limit: 0,
        }
    }

    /// Returns true if the statement asks for skip or limit.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.skip > 0 || self.limit > 0
    }
}

/// A `delete` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStatement {
    /// The entity to delete from.
    pub entity: String,
    /// Fields to remove; empty means whole entities.
    pub fields: Vec<String>,
    /// Root filter condition; `None` matches every entity.
    pub condition: Option<Condition>,
}

impl DeleteStatement {
    /// Creates an unfiltered delete on `entity`.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: vec![],
            condition: None,
        }
    }
}

/// The data written by `insert` and `update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// `(name = value, ...)` assignments.
    Conditions(Vec<Condition>),
    /// A JSON document, given inline or as a parameter.
    Json(QueryValue),
}

impl Payload {
    /// Builds a payload from the parts a statement supplied.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if both or neither of the parts
    /// are present.
    pub fn from_parts(conditions: Option<Vec<Condition>>, json: Option<QueryValue>) -> Result<Self> {
        match (conditions, json) {
            (Some(conditions), None) => Ok(Self::Conditions(conditions)),
            (None, Some(json)) => Ok(Self::Json(json)),
            (Some(_), Some(_)) => Err(QueryError::Semantic(String::from(
                "a payload takes either assignments or a JSON value, not both",
            ))),
            (None, None) => Err(QueryError::Semantic(String::from(
                "a payload requires assignments or a JSON value",
            ))),
        }
    }
}

/// An `insert` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement {
    /// The entity to insert into.
    pub entity: String,
    /// The data to write.
    pub payload: Payload,
    /// Time to live of the inserted entity.
    pub ttl: Option<Duration>,
}

/// An `update` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStatement {
    /// The entity to update.
    pub entity: String,
    /// The data to write.
    pub payload: Payload,
}

/// A `get` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetStatement {
    /// Keys to read.
    pub keys: Vec<QueryValue>,
}

/// A `put` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutStatement {
    /// The key to write.
    pub key: QueryValue,
    /// The value to store.
    pub value: QueryValue,
    /// Time to live of the entry.
    pub ttl: Option<Duration>,
}

/// A `del` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelStatement {
    /// Keys to remove.
    pub keys: Vec<QueryValue>,
}

/// A query statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Statement {
    /// `select`
    Select(SelectStatement),
    /// `insert`
    Insert(InsertStatement),
    /// `update`
    Update(UpdateStatement),
    /// `delete`
    Delete(DeleteStatement),
    /// `get`
    Get(GetStatement),
    /// `put`
    Put(PutStatement),
    /// `del`
    Del(DelStatement),
}

/// The kind of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Get,
    Put,
    Del,
}

impl StatementKind {
    /// Returns the leading keyword of statements of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Get => "get",
            Self::Put => "put",
            Self::Del => "del",
        }
    }

    /// Returns true for statements served by a key-value bucket.
    #[must_use]
    pub const fn is_key_value(&self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Del)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Statement {
    /// Returns the kind of this statement.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Select(_) => StatementKind::Select,
            Self::Insert(_) => StatementKind::Insert,
            Self::Update(_) => StatementKind::Update,
            Self::Delete(_) => StatementKind::Delete,
            Self::Get(_) => StatementKind::Get,
            Self::Put(_) => StatementKind::Put,
            Self::Del(_) => StatementKind::Del,
        }
    }

    /// Returns true for `get`, `put` and `del`.
    #[must_use]
    pub const fn is_key_value(&self) -> bool {
        self.kind().is_key_value()
    }

    /// Returns the root filter condition, for statements that have one.
    #[must_use]
    pub const fn condition(&self) -> Option<&Condition> {
        match self {
            Self::Select(select) => select.condition.as_ref(),
            Self::Delete(delete) => delete.condition.as_ref(),
            _ => None,
        }
    }
}
