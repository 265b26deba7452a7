//! Scripture reference parsing and canonical rendering.
//!
//! A raw string such as `"1st john 4:8-9; gen 1:4,6-10"` is split on `;`,
//! each segment resolves its book (and optional numeric prefix) from the
//! leading tokens, and the rest is scanned for chapter/verse ranges. The
//! [`Display`](std::fmt::Display) impl of [`Reference`] is the canonical form:
//! `"1 John 4:8-9; Genesis 1:4,6-10"`.

mod book;
mod chapter_verse;
mod error;
mod render;

use std::str::FromStr;

use serde::Serialize;

pub use book::{Book, Prefix, resolve_book, resolve_prefix};
pub use chapter_verse::{ChapterVerse, Suffix, parse_chapter_verse};
pub use error::{ParseError, ReferenceError};

/// A parsed reference to one book, with its ranges in input order.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Prefix>,
    pub book: Book,
    pub ranges: Vec<ChapterVerse>,
}

impl FromStr for Reference {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_reference(input)
    }
}

/// Normalizes a `;`-separated list of references, e.g.
/// `"gen 1:4,6, 7; 1st john 4:8"` becomes `"Genesis 1:4,6,7; 1 John 4:8"`.
pub fn clean_reference(input: &str) -> Result<String, ReferenceError> {
    let references = parse_references(input)?;

    Ok(references
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; "))
}

/// Parses every `;`-separated segment, stopping at the first one that fails.
pub fn parse_references(input: &str) -> Result<Vec<Reference>, ReferenceError> {
    input
        .trim_matches('\t')
        .split(';')
        .enumerate()
        .map(|(index, segment)| {
            parse_reference(segment).map_err(|kind| ReferenceError {
                index,
                segment: segment.trim().to_string(),
                kind,
            })
        })
        .collect()
}

/// Parses a single reference segment (no `;`).
pub fn parse_reference(input: &str) -> Result<Reference, ParseError> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next().ok_or(ParseError::MissingBook)?;

    let (prefix, book) = match resolve_prefix(first) {
        Some(prefix) => {
            let token = tokens.next().ok_or(ParseError::MissingBook)?;
            let book = resolve_book(token).ok_or_else(|| ParseError::UnknownPrefixedBook {
                prefix,
                token: token.to_string(),
            })?;
            if !book.is_prefix_eligible() {
                return Err(ParseError::PrefixNotAllowed { prefix, book });
            }
            (Some(prefix), book)
        }
        None => {
            let book = resolve_book(first).ok_or_else(|| ParseError::UnknownBook {
                token: first.to_string(),
            })?;
            (None, book)
        }
    };

    let remainder = tokens.collect::<String>();
    let ranges = parse_chapter_verse(&remainder)?;
    // chapter 0 is the scanner's "unset" value
    if let Some(range) = ranges
        .iter()
        .find(|range| range.start_chapter == 0 || range.end_chapter == 0)
    {
        return Err(ParseError::MissingChapter {
            verse: range.start_verse,
        });
    }

    Ok(Reference {
        prefix,
        book,
        ranges,
    })
}
