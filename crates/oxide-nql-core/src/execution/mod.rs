//! Execution protocol.
//!
//! Statements are checked against backend capabilities, bound, and then
//! dispatched to a [`DatabaseManager`] or a [`BucketManager`].

mod backend;
mod executor;
mod prepared;
mod result;

pub use backend::{BucketManager, Capabilities, Capability, DatabaseManager, ResultStream};
pub use executor::{execute, execute_kv, insert, required_capabilities, update};
pub use prepared::{PreparedState, PreparedStatement};
pub use result::ExecutionResult;
