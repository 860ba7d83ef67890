//! `select` chains.

use super::query::{Draft, QueryBuilder};
use super::state::{
    HasLimit, HasOrder, HasPaging, HasSkip, NameOrder, NoFrom, Orderable, Terminal,
};
use crate::ast::{Condition, SelectStatement, Sort, SortDirection, Statement};
use crate::entity::{Entity, FromEntity};
use crate::error::Result;
use crate::execution::{DatabaseManager, ResultStream};

/// The `select` statement kind.
#[derive(Debug, Default)]
pub struct Select {
    sorts: Vec<Sort>,
    pending_sort: String,
    skip: u64,
    limit: u64,
}

impl Draft for Select {
    fn assemble(self, entity: String, fields: Vec<String>, condition: Option<Condition>) -> Statement {
        Statement::Select(SelectStatement {
            entity,
            fields,
            condition,
            sorts: self.sorts,
            skip: self.skip,
            limit: self.limit,
        })
    }
}

/// Starts a `select` of `fields`; an empty slice selects every field.
///
/// # Example
///
/// ```
/// use oxide_nql_core::builder::select;
///
/// let statement = select(&[])
///     .from("Person")
///     .where_("age")
///     .gt(10)
///     .and("name")
///     .eq("Diana")
///     .order_by("name")
///     .asc()
///     .limit(5)
///     .build()
///     .unwrap();
/// assert_eq!(
///     statement.to_string(),
///     "select * from Person where age > 10 and name = \"Diana\" order by name asc limit 5"
/// );
/// ```
#[must_use]
pub fn select(fields: &[&str]) -> QueryBuilder<Select, NoFrom> {
    QueryBuilder::with_fields(Select::default(), fields)
}

// Ordering and paging: HasFrom | HasWhere | HasOrder
impl<S: Orderable> QueryBuilder<Select, S> {
    /// Orders the results by `name`; the direction follows.
    #[must_use]
    pub fn order_by(mut self, name: &str) -> QueryBuilder<Select, NameOrder> {
        self.check_name("order field", name);
        self.kind.pending_sort = String::from(name);
        self.transition()
    }

    /// Skips the first `count` results.
    #[must_use]
    pub fn skip(mut self, count: u64) -> QueryBuilder<Select, HasSkip> {
        self.kind.skip = count;
        self.transition()
    }

    /// Returns at most `count` results.
    #[must_use]
    pub fn limit(mut self, count: u64) -> QueryBuilder<Select, HasLimit> {
        self.kind.limit = count;
        self.transition()
    }
}

impl QueryBuilder<Select, NameOrder> {
    fn direction(mut self, direction: SortDirection) -> QueryBuilder<Select, HasOrder> {
        let name = std::mem::take(&mut self.kind.pending_sort);
        self.kind.sorts.push(Sort { name, direction });
        self.transition()
    }

    /// Ascending order.
    #[must_use]
    pub fn asc(self) -> QueryBuilder<Select, HasOrder> {
        self.direction(SortDirection::Asc)
    }

    /// Descending order.
    #[must_use]
    pub fn desc(self) -> QueryBuilder<Select, HasOrder> {
        self.direction(SortDirection::Desc)
    }
}

impl QueryBuilder<Select, HasSkip> {
    /// Returns at most `count` results.
    #[must_use]
    pub fn limit(mut self, count: u64) -> QueryBuilder<Select, HasPaging> {
        self.kind.limit = count;
        self.transition()
    }
}

impl QueryBuilder<Select, HasLimit> {
    /// Skips the first `count` results.
    #[must_use]
    pub fn skip(mut self, count: u64) -> QueryBuilder<Select, HasPaging> {
        self.kind.skip = count;
        self.transition()
    }
}

impl<S: Terminal<Select>> QueryBuilder<Select, S> {
    /// Executes and collects every entity.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::execute`], plus stream errors.
    pub fn result(self, manager: &dyn DatabaseManager) -> Result<Vec<Entity>> {
        self.execute(manager)?.into_vec()
    }

    /// Executes and collects every entity, mapped to `M`.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::result`], or when an entity does not map to `M`.
    pub fn result_as<M: FromEntity>(self, manager: &dyn DatabaseManager) -> Result<Vec<M>> {
        self.execute(manager)?.into_vec_as()
    }

    /// Executes and returns the entity stream.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::execute`].
    pub fn stream(self, manager: &dyn DatabaseManager) -> Result<ResultStream<Entity>> {
        Ok(self.execute(manager)?.into_stream())
    }

    /// Executes and returns at most one entity.
    ///
    /// # Errors
    ///
    /// As [`QueryBuilder::execute`], plus
    /// [`QueryError::NonUniqueResult`](crate::QueryError::NonUniqueResult)
    /// for several matches.
    pub fn single_result(self, manager: &dyn DatabaseManager) -> Result<Option<Entity>> {
        self.execute(manager)?.single_result()
    }
}
