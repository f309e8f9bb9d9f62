//! Path tokenizer.
//!
//! A path is split into segment tokens on [`SEPARATOR`] after every `.` has
//! been rewritten to the separator and boundary separators trimmed:
//!
//! ```rust
//! use ramify::routing::tokenize;
//!
//! assert_eq!(tokenize("/users/42/"), vec!["users", "42"]);
//! assert_eq!(tokenize("users.42"), vec!["users", "42"]);
//! assert_eq!(tokenize("/"), vec![""]);
//! ```
//!
//! Tokenizing never fails; malformed paths simply yield tokens that do not
//! match.

/// Segment separator.
pub const SEPARATOR: char = '/';

/// Prefix marking a parameter token, e.g. `:id`.
pub const PARAM_MARKER: char = ':';

/// Split `path` into segment tokens.
///
/// An empty path, or one made only of separators, yields a single empty
/// token.
pub fn tokenize(path: &str) -> Vec<String> {
    path.replace('.', "/")
        .trim_matches(SEPARATOR)
        .split(SEPARATOR)
        .map(str::to_owned)
        .collect()
}

/// A route token, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Matched by exact text equality.
    Literal(&'a str),
    /// Captures one request segment under the given name.
    Param(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a registered token.
    pub fn parse(token: &'a str) -> Self {
        match token.strip_prefix(PARAM_MARKER) {
            Some(name) => Token::Param(name),
            None => Token::Literal(token),
        }
    }

    /// The parameter name, if this is a parameter token.
    pub fn param_name(&self) -> Option<&'a str> {
        match self {
            Token::Param(name) => Some(name),
            Token::Literal(_) => None,
        }
    }
}
