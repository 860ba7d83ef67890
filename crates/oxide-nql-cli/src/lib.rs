//! # oxide-nql-cli
//!
//! The `oxide-nql` command-line tool: parses query statements, prints them
//! in canonical form and lists their parameters.

pub mod cli;
