use thiserror::Error;

use super::book::{Book, Prefix};

/// Why a single reference segment could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("missing book name")]
    MissingBook,

    #[error("invalid book: {token}")]
    UnknownBook { token: String },

    #[error("invalid book: {token} (with prefix {prefix})")]
    UnknownPrefixedBook { prefix: Prefix, token: String },

    #[error("invalid book: {prefix} {book} (cannot have prefix)")]
    PrefixNotAllowed { prefix: Prefix, book: Book },

    #[error("missing chapter before verse {verse}")]
    MissingChapter { verse: u16 },

    #[error("malformed number: {digits}")]
    MalformedNumeric { digits: String },
}

/// A failure in one `;`-separated segment of a longer input. `index` is
/// zero-based; the message counts from one.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("reference #{} `{segment}`: {kind}", .index + 1)]
pub struct ReferenceError {
    pub index: usize,
    pub segment: String,
    pub kind: ParseError,
}
