//! Query parser.
//!
//! A recursive descent parser for statements, with a binding-power loop
//! for `and`/`or` condition chains.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::SyntaxError;
pub use parser::Parser;
