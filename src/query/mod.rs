//! Filter micro-language for the music library.
//!
//! # Syntax overview
//!
//! A query is one or more whitespace-separated predicates:
//!
//! ```text
//! artist=~"José González" year>=2000 track_number<=20
//! ```
//!
//! Each predicate is `key<op>value`, with no spaces between the parts:
//!
//! - **Keys**: `artist`, `album`, `album_artist`, `year`, `track`,
//!   `track_number`, `genre`
//! - **Operators**: `=`, `!=`, `=~` (contains), `>`, `>=`, `<`, `<=`
//! - **Values**: a bare word (anything but whitespace, `"`, and `\`), or a
//!   double-quoted string where `\"` and `\\` are the only escapes
//!
//! Parsing is all-or-nothing: [`parse_query`] returns either a non-empty
//! [`Query`] covering the whole input or the [`crate::ParseError`] for the
//! first point of failure.

mod format;
mod parser;

pub use format::escape_value;
pub use parser::{parse_query, CompareOp, Key, Predicate, Query};
