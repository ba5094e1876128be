//! Verse-of-the-day catalog storage and tooling.
//!
//! The catalog is the fixed list of selectable verse references. Each entry
//! carries a unique, stable identifier plus a book code, chapter and verse
//! range. A default catalog is compiled into the binary, but custom catalogs
//! can also be loaded from JSON files.
//!
//! ## Format
//!
//! ```json
//! [
//!   {"id": 1, "book_code": "JHN", "chapter": 3, "verse_start": 16, "verse_end": 16},
//!   {"id": 2, "book_code": "PSA", "chapter": 23, "verse_start": 1, "verse_end": 6}
//! ]
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use manna::VotdCatalog;
//! use manna::core::types::VerseId;
//! use std::path::Path;
//!
//! let catalog = VotdCatalog::load_embedded().unwrap();
//! let first = catalog.get(VerseId::new(1));
//!
//! let custom = VotdCatalog::load_from_file(Path::new("my_votd.json")).unwrap();
//! ```
//!
//! Catalogs are usually maintained as CSV (`id,book,chapter,verse`) and
//! converted with [`csv`]; [`check`] reports duplicate identifiers and ranges.

pub mod check;
pub mod csv;
pub mod store;
