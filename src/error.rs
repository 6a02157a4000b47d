//! Error types for query parsing.

/// A parse failure, carrying the byte offset of the first failure point.
///
/// Every variant except [`ParseError::EmptyQuery`] embeds the offset into
/// the original input; [`ParseError::offset`] exposes it uniformly. The
/// `Display` message and the offset together form the diagnostic shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty query")]
    EmptyQuery,

    #[error("unknown key `{key}` at byte {offset}")]
    UnknownKey { key: String, offset: usize },

    #[error("invalid operator at byte {offset}")]
    InvalidOperator { offset: usize },

    #[error("unterminated quoted value starting at byte {offset}")]
    UnterminatedQuotedValue { offset: usize },

    #[error("empty value at byte {offset}")]
    EmptyValue { offset: usize },

    #[error("invalid escape sequence `\\{found}` at byte {offset}")]
    InvalidEscapeSequence { found: char, offset: usize },

    #[error("trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}

impl ParseError {
    /// Byte offset into the input where parsing failed.
    ///
    /// `None` only for [`ParseError::EmptyQuery`], where no single position
    /// applies.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::EmptyQuery => None,
            ParseError::UnknownKey { offset, .. }
            | ParseError::InvalidOperator { offset }
            | ParseError::UnterminatedQuotedValue { offset }
            | ParseError::EmptyValue { offset }
            | ParseError::InvalidEscapeSequence { offset, .. }
            | ParseError::TrailingInput { offset } => Some(*offset),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
