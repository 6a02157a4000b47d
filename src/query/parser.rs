//! Recursive-descent parser for the filter micro-language.

use crate::error::{ParseError, Result};

/// A queryable track field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Key {
    Artist,
    Album,
    AlbumArtist,
    Year,
    Track,
    TrackNumber,
    Genre,
}

impl Key {
    /// Every queryable field.
    pub const ALL: [Key; 7] = [
        Key::Artist,
        Key::Album,
        Key::AlbumArtist,
        Key::Year,
        Key::Track,
        Key::TrackNumber,
        Key::Genre,
    ];

    /// The field name as written in query strings.
    pub fn name(self) -> &'static str {
        match self {
            Key::Artist => "artist",
            Key::Album => "album",
            Key::AlbumArtist => "album_artist",
            Key::Year => "year",
            Key::Track => "track",
            Key::TrackNumber => "track_number",
            Key::Genre => "genre",
        }
    }

    fn resolve(ident: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.name() == ident)
    }
}

impl std::str::FromStr for Key {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Key> {
        Key::resolve(s).ok_or_else(|| ParseError::UnknownKey {
            key: s.to_string(),
            offset: 0,
        })
    }
}

/// Comparison operators for predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompareOp {
    /// `=` equals
    Eq,
    /// `!=` not equals
    NotEq,
    /// `=~` contains
    Contains,
    /// `>` greater than
    Gt,
    /// `>=` greater or equal
    Gte,
    /// `<` less than
    Lt,
    /// `<=` less or equal
    Lte,
}

impl CompareOp {
    /// Candidate tokens in match order. Two-character tokens come first so a
    /// shared prefix never wins early: `>` must not match when the input
    /// holds `>=`.
    const TOKENS: [(&'static str, CompareOp); 7] = [
        ("!=", CompareOp::NotEq),
        ("=~", CompareOp::Contains),
        (">=", CompareOp::Gte),
        ("<=", CompareOp::Lte),
        (">", CompareOp::Gt),
        ("<", CompareOp::Lt),
        ("=", CompareOp::Eq),
    ];

    /// The canonical textual token.
    pub fn token(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Contains => "=~",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl std::str::FromStr for CompareOp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<CompareOp> {
        CompareOp::TOKENS
            .into_iter()
            .find_map(|(token, op)| (token == s).then_some(op))
            .ok_or(ParseError::InvalidOperator { offset: 0 })
    }
}

/// One `key<op>value` filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predicate {
    /// Field the predicate filters on
    pub key: Key,
    /// Comparison operator
    pub op: CompareOp,
    /// Value to compare against. Never empty when produced by the parser,
    /// and always an owned copy of the input text.
    pub value: String,
}

/// An ordered, non-empty sequence of predicates parsed from one query
/// string.
///
/// Order is preserved from the input and is meaningful to consumers, which
/// treat the sequence as a conjunction. A `Query` is only ever produced by a
/// successful [`parse_query`] and has no mutating API.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    /// The parsed predicates, in input order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Number of predicates; at least 1.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Always `false`: an empty query never parses.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl IntoIterator for Query {
    type Item = Predicate;
    type IntoIter = std::vec::IntoIter<Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

/// Parse a query string into a validated [`Query`].
///
/// The entire input must parse. On failure the returned error describes the
/// first failure point; no partial query is ever produced. Leading and
/// trailing whitespace are permitted, predicates are separated by one or
/// more whitespace characters, and an empty or whitespace-only input is
/// rejected.
pub fn parse_query(input: &str) -> Result<Query> {
    let mut pos = skip_whitespace(input, 0);
    if pos == input.len() {
        return Err(ParseError::EmptyQuery);
    }

    let mut predicates = Vec::new();
    loop {
        let (predicate, next) = parse_predicate(input, pos)?;
        predicates.push(predicate);
        if next == input.len() {
            break;
        }

        // Predicates must be separated by at least one whitespace character;
        // anything else glued to a value is unconsumed garbage.
        let after_ws = skip_whitespace(input, next);
        if after_ws == next {
            return Err(ParseError::TrailingInput { offset: next });
        }
        if after_ws == input.len() {
            break;
        }
        pos = after_ws;
    }

    Ok(Query { predicates })
}

fn skip_whitespace(input: &str, pos: usize) -> usize {
    input[pos..]
        .find(|c: char| !c.is_ascii_whitespace())
        .map_or(input.len(), |i| pos + i)
}

/// Parse one `key<op>value` run starting at `pos`. No whitespace is allowed
/// between the three parts.
fn parse_predicate(input: &str, pos: usize) -> Result<(Predicate, usize)> {
    let (key, pos) = parse_key(input, pos)?;
    let (op, pos) = parse_operator(input, pos)?;
    let (value, pos) = parse_value(input, pos)?;
    Ok((Predicate { key, op, value }, pos))
}

/// Consume a maximal run of lowercase letters and underscores and resolve it
/// against the key set. Maximal munch keeps `track_number` from resolving as
/// `track` followed by garbage.
fn parse_key(input: &str, pos: usize) -> Result<(Key, usize)> {
    let rest = &input[pos..];
    let end = rest
        .find(|c: char| !c.is_ascii_lowercase() && c != '_')
        .unwrap_or(rest.len());
    let ident = &rest[..end];

    if ident.is_empty() {
        // Not even the shape of a key; report the word sitting there.
        let word_end = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        return Err(ParseError::UnknownKey {
            key: rest[..word_end].to_string(),
            offset: pos,
        });
    }

    match Key::resolve(ident) {
        Some(key) => Ok((key, pos + end)),
        None => Err(ParseError::UnknownKey {
            key: ident.to_string(),
            offset: pos,
        }),
    }
}

/// Match one comparison operator token, longest candidates first (see
/// [`CompareOp::TOKENS`]).
fn parse_operator(input: &str, pos: usize) -> Result<(CompareOp, usize)> {
    let rest = &input[pos..];
    for (token, op) in CompareOp::TOKENS {
        if rest.starts_with(token) {
            return Ok((op, pos + token.len()));
        }
    }
    Err(ParseError::InvalidOperator { offset: pos })
}

/// Scan one value literal. The quoted form is tried first; both forms
/// decode to at least one character.
fn parse_value(input: &str, pos: usize) -> Result<(String, usize)> {
    if input[pos..].starts_with('"') {
        parse_quoted_value(input, pos)
    } else {
        parse_unquoted_value(input, pos)
    }
}

/// Decode a double-quoted value starting at the opening quote. `\"` and
/// `\\` are the only escapes; any scalar in `[U+0020, U+10FFFF]` other than
/// `"` and `\` passes through literally.
fn parse_quoted_value(input: &str, pos: usize) -> Result<(String, usize)> {
    let body = &input[pos + 1..];
    let mut value = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                if value.is_empty() {
                    return Err(ParseError::EmptyValue { offset: pos });
                }
                return Ok((value, pos + 1 + i + 1));
            }
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => value.push(escaped),
                Some((_, other)) => {
                    return Err(ParseError::InvalidEscapeSequence {
                        found: other,
                        offset: pos + 1 + i,
                    });
                }
                None => {
                    return Err(ParseError::UnterminatedQuotedValue { offset: pos });
                }
            },
            c if (c as u32) < 0x20 => {
                // Control characters are not legal body characters, so the
                // literal can never be closed.
                return Err(ParseError::UnterminatedQuotedValue { offset: pos });
            }
            c => value.push(c),
        }
    }

    Err(ParseError::UnterminatedQuotedValue { offset: pos })
}

/// Scan a bare value: a maximal run of scalars above U+0020, excluding `"`
/// and `\`. Excluding the space means the run is terminated by whitespace
/// with no lookahead.
fn parse_unquoted_value(input: &str, pos: usize) -> Result<(String, usize)> {
    let rest = &input[pos..];
    let end = rest
        .find(|c: char| (c as u32) <= 0x20 || c == '"' || c == '\\')
        .unwrap_or(rest.len());

    if end == 0 {
        return Err(ParseError::EmptyValue { offset: pos });
    }
    Ok((rest[..end].to_string(), pos + end))
}
