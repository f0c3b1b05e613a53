//! Injectable randomness for ritual resolution.
//!
//! Every random decision in the engine is derived from a single primitive:
//! a uniform real in `[0, 100)`. Integer picks are mapped from it, so a
//! scripted sequence of percentages replays a resolution exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest value a source may yield; keeps rolls strictly below 100.
const MAX_ROLL: f64 = 100.0 - 1e-9;

/// A source of uniform percentages.
pub trait RandomSource {
    /// A uniform real in `[0, 100)`.
    fn roll_percent(&mut self) -> f64;

    /// A uniform index in `0..len`. Returns 0 when `len` is 0.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let r = self.roll_percent();
        let index = (r / 100.0 * len as f64).floor() as usize;
        index.min(len - 1)
    }

    /// A uniform integer in `low..=high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as usize;
        low + self.pick_index(span) as u32
    }
}

/// Production source backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Create a reproducible source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededSource {
    fn roll_percent(&mut self) -> f64 {
        self.rng.random_range(0.0..100.0)
    }
}

/// Replays a fixed sequence of percentages, cycling when exhausted.
///
/// Values are clamped into `[0, 100)`. An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source that yields `rolls` in order.
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn roll_percent(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let r = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        r.clamp(0.0, MAX_ROLL)
    }
}
