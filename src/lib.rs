//! # manna
//!
//! A verse-of-the-day picker that never repeats itself within a cycle.
//!
//! A fixed catalog lists the verse ranges eligible for selection. Each pick
//! draws one entry uniformly at random from the pool of entries not yet shown
//! and persists the reduced pool, so that over a catalog of N entries, N
//! consecutive picks show every entry exactly once. The pool then refills and
//! a new cycle starts. The text of the picked range is read from a keyed JSON
//! Bible corpus in a single streaming pass.
//!
//! ## Features
//!
//! - **Non-repeating cycles**: The unused pool survives between runs
//! - **Self-healing state**: Missing, corrupt or stale pool files reset the cycle
//! - **Streaming lookup**: Only the requested book of a large corpus is decoded
//! - **Catalog tooling**: CSV import and duplicate checking
//!
//! ## Example
//!
//! ```rust,no_run
//! use manna::{FilePoolStore, PassageResolver, Picker, VotdCatalog};
//!
//! let catalog = VotdCatalog::load_embedded().unwrap();
//! let mut picker = Picker::new(&catalog, FilePoolStore::new("unused_ids.json"));
//! let reference = picker.pick().unwrap();
//!
//! let resolver = PassageResolver::new("bible_kjv.json");
//! let passage = resolver.resolve(&reference.range).unwrap();
//! println!("{passage}\n\n  {}", reference.range.label());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Verse catalog storage, CSV import and duplicate checks
//! - [`core`]: Verse identifiers, ranges and the book table
//! - [`pool`]: The persisted pool of unused verses
//! - [`picker`]: Non-repeating selection over the catalog
//! - [`passage`]: Streaming passage lookup in a JSON corpus
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod farewell;
pub mod passage;
pub mod picker;
pub mod pool;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::VotdCatalog;
pub use core::reference::{VerseRange, VerseReference};
pub use core::types::*;
pub use passage::resolver::{PassageError, PassageResolver};
pub use passage::Passage;
pub use picker::{Pick, PickError, Picker};
pub use pool::{
    FilePoolStore, LoadedPool, MemoryPoolStore, Pool, PoolState, PoolStore, ResetReason,
};
