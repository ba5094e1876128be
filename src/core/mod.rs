//! Core data types for verse selection and lookup.
//!
//! - [`VerseId`]: Stable identifier of a catalog entry
//! - [`BookCode`]: Short book code matching the corpus keys (`GEN`, `1CO`, ...)
//! - [`VerseRange`]: Book, chapter and inclusive verse bounds
//! - [`VerseReference`]: A catalog entry (identifier plus range)
//!
//! ## Book Codes
//!
//! Codes follow the USFX/Paratext convention used by the corpus:
//!
//! | Book | Code |
//! |------|------|
//! | Genesis | GEN |
//! | Psalms | PSA |
//! | John | JHN |
//! | 1 Corinthians | 1CO |
//!
//! [`book`] maps between codes and English names.
//!
//! [`VerseId`]: types::VerseId
//! [`BookCode`]: types::BookCode
//! [`VerseRange`]: reference::VerseRange
//! [`VerseReference`]: reference::VerseReference

pub mod book;
pub mod reference;
pub mod types;
