use crate::TieBreaker;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A [`TieBreaker`] backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomTieBreaker(StdRng);

impl RandomTieBreaker {
    /// Seeds the generator from operating system entropy.
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide entropy.
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds the generator deterministically.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl TieBreaker for RandomTieBreaker {
    fn coin_flip(&mut self) -> bool {
        self.0.random_bool(0.5)
    }
}
