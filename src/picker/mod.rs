//! Non-repeating verse-of-the-day selection.
//!
//! [`Picker`] combines the catalog with a [`PoolStore`](crate::pool::PoolStore):
//! every pick loads the pool (resetting it when the previous cycle finished or
//! the stored state is unusable), draws one identifier uniformly at random,
//! persists the reduced pool and returns the matching catalog entry. Over a
//! catalog of N entries, N consecutive picks return every entry exactly once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use manna::{FilePoolStore, Picker, VotdCatalog};
//!
//! let catalog = VotdCatalog::load_embedded().unwrap();
//! let store = FilePoolStore::new("unused_ids.json");
//! let mut picker = Picker::new(&catalog, store);
//!
//! let reference = picker.pick().unwrap();
//! println!("{}", reference.range.label());
//! ```

pub mod engine;

pub use engine::{Pick, PickError, Picker};
