//! Configuration for a ritual session.

use offering_core::SeededSource;

/// Configuration for the state machine and the approver's random source.
#[derive(Debug, Clone, Default)]
pub struct RitualConfig {
    /// RNG seed for reproducible resolutions. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Write with the store's revision check instead of last-write-wins.
    pub conditional_writes: bool,
}

impl RitualConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable revision-checked writes.
    pub fn with_conditional_writes(mut self, enabled: bool) -> Self {
        self.conditional_writes = enabled;
        self
    }

    /// Build the random source this configuration describes.
    pub fn random_source(&self) -> SeededSource {
        match self.seed {
            Some(seed) => SeededSource::new(seed),
            None => SeededSource::from_os_rng(),
        }
    }
}
