//! Random-source policy for one selection call.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A call is either fully seeded or fully entropic, decided up front;
/// the two are never mixed within one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Reproducible: every draw comes from a stream seeded with this value.
    Fixed(u64),
    /// Non-deterministic: the stream is seeded from system entropy.
    Entropy,
}

impl SeedMode {
    /// Build the rng for this call. `StdRng` keeps the stream stable across
    /// platforms, which the reproducibility contract depends on.
    pub fn rng(self) -> StdRng {
        match self {
            SeedMode::Fixed(seed) => StdRng::seed_from_u64(seed),
            SeedMode::Entropy => StdRng::from_entropy(),
        }
    }
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Entropy
    }
}
