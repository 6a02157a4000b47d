//! melodex-filter: the filter query language for the melodex music library.
//!
//! Parses whitespace-separated `key<op>value` predicates into a validated
//! [`Query`] and renders queries back to text. The surrounding indexer hands
//! the raw query string in and maps the resulting predicates onto its
//! storage layer; both of those live outside this crate.

pub mod error;
pub mod query;

pub use error::{ParseError, Result};
pub use query::{escape_value, parse_query, CompareOp, Key, Predicate, Query};
