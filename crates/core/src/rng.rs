//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds with equal probability, with no bag
//! and no history. The generator is seeded, so the same seed replays the same
//! piece sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Seeded uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
}

impl PieceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw the next kind
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.random_range(0..PieceKind::COUNT);
        PieceKind::ALL[index]
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
