//! Persisted pool of verse identifiers not yet shown in the current cycle.
//!
//! The pool is the only state that survives between runs. It is read and
//! rewritten through a [`PoolStore`], which hides the storage medium (a JSON
//! file in production, memory in tests) behind a `read_state`/`write_state`
//! pair. Loading always reconciles the stored state against the current
//! catalog:
//!
//! | Stored state | Result |
//! |--------------|--------|
//! | nothing stored yet | fresh full pool (`Reset(Missing)`) |
//! | not a JSON array of ids | fresh full pool (`Reset(Unparsable)`) |
//! | `[]` | fresh full pool (`Reset(Exhausted)`), the cycle is complete |
//! | an id listed twice | fresh full pool (`Reset(Duplicate)`) |
//! | an id missing from the catalog | fresh full pool (`Reset(Stale)`) |
//! | otherwise | the stored ids (`Resumed`) |
//!
//! Resets are never errors: they are the self-healing path for stale or
//! corrupt state. Only I/O failures (other than "not found") are surfaced.

pub mod file;
pub mod memory;

use rand::Rng;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::types::VerseId;

pub use file::FilePoolStore;
pub use memory::MemoryPoolStore;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Failed to access pool state at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize pool: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Pool store unavailable: {0}")]
    Backend(String),
}

/// Why a stored pool was discarded in favour of the full catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Nothing has been stored yet
    Missing,
    /// The stored content is not a JSON array of identifiers
    Unparsable,
    /// The stored pool is empty: every verse was shown this cycle
    Exhausted,
    /// The stored pool lists an identifier twice
    Duplicate(VerseId),
    /// The stored pool references an identifier the catalog no longer has
    Stale(VerseId),
}

impl std::fmt::Display for ResetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no stored pool"),
            Self::Unparsable => write!(f, "stored pool is unreadable"),
            Self::Exhausted => write!(f, "cycle complete"),
            Self::Duplicate(id) => write!(f, "stored pool lists id {id} twice"),
            Self::Stale(id) => write!(f, "stored pool has id {id} not in catalog"),
        }
    }
}

/// How the pool returned by [`PoolStore::load`] came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// The stored pool was valid and is used as-is
    Resumed,
    /// The stored pool was discarded and regenerated from the catalog
    Reset(ResetReason),
}

/// A pool together with the transition that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPool {
    pub pool: Pool,
    pub state: PoolState,
}

/// Set of verse identifiers still available in the current cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    ids: BTreeSet<VerseId>,
}

impl Pool {
    /// A pool holding every identifier of the catalog
    #[must_use]
    pub fn full(universe: &[VerseId]) -> Self {
        universe.iter().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: VerseId) -> bool {
        self.ids.contains(&id)
    }

    /// Identifiers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = VerseId> + '_ {
        self.ids.iter().copied()
    }

    /// Remove and return one identifier, each remaining one equally likely
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<VerseId> {
        if self.ids.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.ids.len());
        let id = self.ids.iter().nth(index).copied()?;
        self.ids.remove(&id);
        Some(id)
    }

    /// Serialize as an ascending JSON array of integers
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let ids: Vec<VerseId> = self.iter().collect();
        serde_json::to_string(&ids)
    }
}

impl FromIterator<VerseId> for Pool {
    fn from_iter<I: IntoIterator<Item = VerseId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Reconcile stored pool text against the catalog's identifiers
///
/// `stored` is `None` when nothing has been persisted yet. Every invalid
/// state yields the full pool with the matching [`ResetReason`]; no partial
/// repair is attempted.
#[must_use]
pub fn reconcile(stored: Option<&str>, universe: &[VerseId]) -> LoadedPool {
    let reset = |reason| LoadedPool {
        pool: Pool::full(universe),
        state: PoolState::Reset(reason),
    };

    let Some(text) = stored else {
        return reset(ResetReason::Missing);
    };

    let ids: Vec<VerseId> = match serde_json::from_str(text) {
        Ok(ids) => ids,
        Err(e) => {
            debug!("Discarding unparsable pool state: {e}");
            return reset(ResetReason::Unparsable);
        }
    };

    if ids.is_empty() {
        return reset(ResetReason::Exhausted);
    }

    let known: HashSet<VerseId> = universe.iter().copied().collect();
    let mut pool = Pool::default();
    for id in ids {
        if !known.contains(&id) {
            return reset(ResetReason::Stale(id));
        }
        if !pool.ids.insert(id) {
            return reset(ResetReason::Duplicate(id));
        }
    }

    LoadedPool {
        pool,
        state: PoolState::Resumed,
    }
}

/// Durable storage for the pool
///
/// Implementors only move serialized text in and out; the reset rules live
/// in the provided [`load`](PoolStore::load) and [`save`](PoolStore::save).
pub trait PoolStore {
    /// The stored text, or `None` when nothing has been stored yet
    ///
    /// # Errors
    ///
    /// Any failure other than "not stored yet".
    fn read_state(&self) -> Result<Option<String>, PoolError>;

    /// Replace the stored text
    ///
    /// # Errors
    ///
    /// Returns a `PoolError` if the text could not be stored.
    fn write_state(&mut self, contents: &str) -> Result<(), PoolError>;

    /// Load the pool for the given catalog identifiers
    ///
    /// # Errors
    ///
    /// Only read failures are surfaced; invalid content resets the pool.
    fn load(&self, universe: &[VerseId]) -> Result<LoadedPool, PoolError> {
        let stored = self.read_state()?;
        let loaded = reconcile(stored.as_deref(), universe);
        match loaded.state {
            PoolState::Resumed => debug!("Resuming pool with {} verses left", loaded.pool.len()),
            PoolState::Reset(reason) => info!(
                "Starting a fresh pool of {} verses ({reason})",
                loaded.pool.len()
            ),
        }
        Ok(loaded)
    }

    /// Persist the pool
    ///
    /// # Errors
    ///
    /// Returns a `PoolError` if serialization or the write fails.
    fn save(&mut self, pool: &Pool) -> Result<(), PoolError> {
        let json = pool.to_json()?;
        self.write_state(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(values: &[u32]) -> Vec<VerseId> {
        values.iter().copied().map(VerseId::new).collect()
    }

    #[test]
    fn test_reconcile_missing() {
        let loaded = reconcile(None, &ids(&[1, 2, 3]));
        assert_eq!(loaded.state, PoolState::Reset(ResetReason::Missing));
        assert_eq!(loaded.pool, Pool::full(&ids(&[1, 2, 3])));
    }

    #[test]
    fn test_reconcile_unparsable() {
        for text in ["", "not json", "{\"ids\": [1]}", "[1, \"two\"]", "[-1]"] {
            let loaded = reconcile(Some(text), &ids(&[1, 2]));
            assert_eq!(
                loaded.state,
                PoolState::Reset(ResetReason::Unparsable),
                "input {text:?}"
            );
            assert_eq!(loaded.pool.len(), 2);
        }
    }

    #[test]
    fn test_reconcile_exhausted() {
        let loaded = reconcile(Some("[]"), &ids(&[1, 2, 3]));
        assert_eq!(loaded.state, PoolState::Reset(ResetReason::Exhausted));
        assert_eq!(loaded.pool.len(), 3);
    }

    #[test]
    fn test_reconcile_stale_id_resets_whole_pool() {
        let loaded = reconcile(Some("[2, 99]"), &ids(&[1, 2, 3]));
        assert_eq!(
            loaded.state,
            PoolState::Reset(ResetReason::Stale(VerseId::new(99)))
        );
        // Full pool, not the filtered [2]
        assert_eq!(loaded.pool, Pool::full(&ids(&[1, 2, 3])));
    }

    #[test]
    fn test_reconcile_duplicate_id() {
        let loaded = reconcile(Some("[2, 2]"), &ids(&[1, 2, 3]));
        assert_eq!(
            loaded.state,
            PoolState::Reset(ResetReason::Duplicate(VerseId::new(2)))
        );
        assert_eq!(loaded.pool.len(), 3);
    }

    #[test]
    fn test_reconcile_resumes_valid_pool() {
        let loaded = reconcile(Some("[3, 1]"), &ids(&[1, 2, 3]));
        assert_eq!(loaded.state, PoolState::Resumed);
        assert_eq!(loaded.pool.iter().collect::<Vec<_>>(), ids(&[1, 3]));
    }

    #[test]
    fn test_to_json_is_sorted() {
        let pool: Pool = ids(&[5, 1, 3]).into_iter().collect();
        assert_eq!(pool.to_json().unwrap(), "[1,3,5]");
    }

    #[test]
    fn test_draw_removes_each_id_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = Pool::full(&ids(&[10, 20, 30, 40]));
        let mut drawn = Vec::new();
        while let Some(id) = pool.draw(&mut rng) {
            assert!(!pool.contains(id));
            drawn.push(id);
        }
        drawn.sort();
        assert_eq!(drawn, ids(&[10, 20, 30, 40]));
        assert!(pool.draw(&mut rng).is_none());
    }

    #[test]
    fn test_draw_reaches_every_id() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut first_draws = HashSet::new();
        for _ in 0..200 {
            let mut pool = Pool::full(&ids(&[1, 2, 3]));
            first_draws.insert(pool.draw(&mut rng).unwrap());
        }
        assert_eq!(first_draws.len(), 3);
    }
}
