//! Canonical text rendering for queries and predicates.

use std::fmt::{self, Write as _};

use super::parser::{CompareOp, Key, Predicate, Query};

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Escape a value for the canonical rendering.
///
/// Works byte-wise over the UTF-8 encoding: `"` and `\` become two-character
/// backslash escapes, printable ASCII (including the space) passes through,
/// and every other byte becomes a four-character `\xHH` escape with
/// uppercase hex digits.
///
/// The canonical rendering does not re-quote values, so an escaped value
/// containing a space will not re-parse to the same query. Use
/// [`Predicate::to_parsable_string`] when round-tripping matters.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for &byte in value.as_bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(byte as char),
            _ => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\x{byte:02X}");
            }
        }
    }
    out
}

impl fmt::Display for Predicate {
    /// Canonical form: `<key><op><escaped-value>`, unquoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.op, escape_value(&self.value))
    }
}

impl fmt::Display for Query {
    /// Canonical form: predicates joined by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

impl Predicate {
    /// Render this predicate in grammar form, so it re-parses to an equal
    /// predicate.
    ///
    /// Values containing whitespace, `"`, or `\` are emitted double-quoted
    /// with `\"`/`\\` escapes; everything else is emitted bare. Unlike the
    /// canonical `Display` form this is round-trip safe for any value the
    /// grammar can produce.
    pub fn to_parsable_string(&self) -> String {
        let mut out = String::new();
        out.push_str(self.key.name());
        out.push_str(self.op.token());

        let needs_quotes = self
            .value
            .chars()
            .any(|c| (c as u32) <= 0x20 || c == '"' || c == '\\');
        if needs_quotes {
            out.push('"');
            for c in self.value.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(&self.value);
        }
        out
    }
}

impl Query {
    /// Render the whole query in grammar form; see
    /// [`Predicate::to_parsable_string`].
    pub fn to_parsable_string(&self) -> String {
        let mut out = String::new();
        for (i, predicate) in self.predicates().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&predicate.to_parsable_string());
        }
        out
    }
}
