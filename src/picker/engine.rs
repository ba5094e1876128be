use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::debug;

use crate::catalog::store::VotdCatalog;
use crate::core::reference::VerseReference;
use crate::core::types::VerseId;
use crate::pool::{PoolError, PoolState, PoolStore};

#[derive(Error, Debug)]
pub enum PickError {
    #[error("Catalog is empty: there is nothing to pick from")]
    EmptyCatalog,

    #[error("Failed to load verse pool: {0}")]
    Load(#[source] PoolError),

    /// The draw happened but the reduced pool was not persisted, so the next
    /// run may show this verse again.
    #[error("Picked {reference} but failed to save the verse pool: {source}")]
    Persist {
        reference: Box<VerseReference>,
        #[source]
        source: PoolError,
    },

    #[error("Pool drew id {0}, which is not in the catalog")]
    UnknownId(VerseId),
}

/// Outcome of one pick
#[derive(Debug, Clone)]
pub struct Pick {
    /// The chosen catalog entry
    pub reference: VerseReference,

    /// Verses left in the cycle after this pick
    pub remaining: usize,

    /// Whether the pool was resumed or regenerated before drawing
    pub pool_state: PoolState,
}

/// Draws catalog entries without repetition until the catalog is exhausted
pub struct Picker<'a, S: PoolStore> {
    catalog: &'a VotdCatalog,
    store: S,
    rng: StdRng,
}

impl<'a, S: PoolStore> Picker<'a, S> {
    /// Create a picker with an OS-seeded random source
    pub fn new(catalog: &'a VotdCatalog, store: S) -> Self {
        Self::with_rng(catalog, store, StdRng::from_os_rng())
    }

    /// Create a picker with a fixed seed for reproducible draws
    pub fn with_seed(catalog: &'a VotdCatalog, store: S, seed: u64) -> Self {
        Self::with_rng(catalog, store, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(catalog: &'a VotdCatalog, store: S, rng: StdRng) -> Self {
        Self {
            catalog,
            store,
            rng,
        }
    }

    /// Pick the next verse reference
    ///
    /// # Errors
    ///
    /// See [`Picker::draw`].
    pub fn pick(&mut self) -> Result<VerseReference, PickError> {
        self.draw().map(|pick| pick.reference)
    }

    /// Pick the next verse reference, reporting the pool transition
    ///
    /// # Errors
    ///
    /// Returns `PickError::EmptyCatalog` if there is nothing to pick,
    /// `PickError::Load` if the pool cannot be read, and
    /// `PickError::Persist` (carrying the drawn reference) if the reduced
    /// pool cannot be saved.
    pub fn draw(&mut self) -> Result<Pick, PickError> {
        let universe = self.catalog.ids();
        let loaded = self.store.load(&universe).map_err(PickError::Load)?;
        let mut pool = loaded.pool;

        let id = pool
            .draw(&mut self.rng)
            .ok_or(PickError::EmptyCatalog)?;
        let reference = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(PickError::UnknownId(id))?;

        debug!("Picked {reference}, {} left in cycle", pool.len());

        if let Err(source) = self.store.save(&pool) {
            return Err(PickError::Persist {
                reference: Box::new(reference),
                source,
            });
        }

        Ok(Pick {
            reference,
            remaining: pool.len(),
            pool_state: loaded.state,
        })
    }

    /// The underlying pool store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
