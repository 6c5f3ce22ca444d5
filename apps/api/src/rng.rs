//! Injectable random source for the non-deterministic "flavour" figures
//! (volume/difficulty jitter, cpc, template result percentages).
//!
//! Scoring, intent, expansion and clustering never touch this.

use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Shared handle over a boxed `RngCore`. Cheap to clone; all clones draw from
/// the same stream.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<Box<dyn RngCore + Send>>>,
}

impl SharedRng {
    pub fn new<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(rng))),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Runs `f` with exclusive access to the generator. Never hold this across an `.await`.
    pub fn with<T>(&self, f: impl FnOnce(&mut (dyn RngCore + Send)) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut **guard)
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}
