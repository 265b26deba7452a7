//! Passage text retrieval. Nothing in [`crate::reference`] depends on this
//! module; it consumes canonical reference strings.

pub mod extract;
pub mod fetch;

pub use extract::extract_passage;
pub use fetch::{
    DEFAULT_ENDPOINT, FetchError, HttpPassageSource, PASSAGE_CONTAINER_CLASS, PassageSource,
};
