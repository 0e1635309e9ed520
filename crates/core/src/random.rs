use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of randomness for quiz generation.
///
/// Mirrors [`Clock`](crate::Clock): production code uses the thread RNG,
/// tests pin a seed so question order and options are reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RandomSource {
    #[default]
    Thread,
    Seeded(u64),
}

impl RandomSource {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(seed)
    }

    /// Build a fresh generator from this source.
    ///
    /// A seeded source yields the same sequence on every call.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self {
            RandomSource::Thread => StdRng::from_rng(&mut rand::rng()),
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, RandomSource::Seeded(_))
    }
}
