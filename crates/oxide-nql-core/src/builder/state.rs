//! Typestate markers for [`QueryBuilder`](super::QueryBuilder).

use super::delete::Delete;
use super::select::Select;

// Typestate markers

/// Marker: no entity specified yet.
pub struct NoFrom;
/// Marker: entity specified.
pub struct HasFrom;
/// Marker: a field name awaits its predicate.
pub struct NameCondition;
/// Marker: a negated field name awaits its predicate.
pub struct NotCondition;
/// Marker: the filter ends with a complete predicate.
pub struct HasWhere;
/// Marker: an ordering field awaits its direction.
pub struct NameOrder;
/// Marker: at least one ordering specified.
pub struct HasOrder;
/// Marker: skip specified.
pub struct HasSkip;
/// Marker: limit specified.
pub struct HasLimit;
/// Marker: skip and limit specified.
pub struct HasPaging;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// States in which a predicate completes the pending field name.
pub trait PredicateState: sealed::Sealed {}

/// States from which ordering and paging may start.
pub trait Orderable: sealed::Sealed {}

/// States in which a statement of kind `K` is complete.
pub trait Terminal<K>: sealed::Sealed {}

macro_rules! sealed {
    ($($state:ty),* $(,)?) => {
        $(impl sealed::Sealed for $state {})*
    };
}

sealed!(
    NoFrom,
    HasFrom,
    NameCondition,
    NotCondition,
    HasWhere,
    NameOrder,
    HasOrder,
    HasSkip,
    HasLimit,
    HasPaging,
    Select,
    Delete,
);

impl PredicateState for NameCondition {}
impl PredicateState for NotCondition {}

impl Orderable for HasFrom {}
impl Orderable for HasWhere {}
impl Orderable for HasOrder {}

impl Terminal<Select> for HasFrom {}
impl Terminal<Select> for HasWhere {}
impl Terminal<Select> for HasOrder {}
impl Terminal<Select> for HasSkip {}
impl Terminal<Select> for HasLimit {}
impl Terminal<Select> for HasPaging {}

impl Terminal<Delete> for HasFrom {}
impl Terminal<Delete> for HasWhere {}
