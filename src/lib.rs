//! Normalization of free-form scripture references.
//!
//! ```text
//! "1st john 4:8-9; gen 1:4,6, 7"  ──►  "1 John 4:8-9; Genesis 1:4,6,7"
//! ```
//!
//! # Modules
//!
//! - [`reference`] - book resolution, chapter/verse parsing, canonical rendering
//! - [`passage`] - fetching passage text for a canonical reference
//! - [`cache`] - local store of fetched passages

pub mod cache;
pub mod passage;
pub mod reference;
mod util;

pub use reference::{
    Book, ChapterVerse, ParseError, Prefix, Reference, ReferenceError, Suffix, clean_reference,
    parse_reference, parse_references,
};
