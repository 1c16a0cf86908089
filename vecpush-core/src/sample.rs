//! Sample sources feeding [`crate::Payload::generate`].
//!
//! Provides uniform noise in `[-1.0, 1.0]` with optional deterministic
//! seeding, and a fixed source for callers that already have their values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lower bound of every generated sample.
pub const SAMPLE_MIN: f32 = -1.0;
/// Upper bound of every generated sample (inclusive).
pub const SAMPLE_MAX: f32 = 1.0;

/// Something that yields one `f32` per call.
pub trait SampleSource {
    fn next_sample(&mut self) -> f32;
}

// ── UniformSource ────────────────────────────────────────────────

/// Uniform samples in `[SAMPLE_MIN, SAMPLE_MAX]`.
#[derive(Clone)]
pub struct UniformSource {
    rng: SmallRng,
}

impl UniformSource {
    /// Seed from OS entropy; every run differs.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Same seed, same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// `seed == 0` means entropy, anything else is a fixed seed.
    pub fn from_seed_option(seed: u64) -> Self {
        if seed == 0 {
            Self::from_entropy()
        } else {
            Self::seeded(seed)
        }
    }
}

impl SampleSource for UniformSource {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.rng.random_range(SAMPLE_MIN..=SAMPLE_MAX)
    }
}

// ── FixedSource ──────────────────────────────────────────────────

/// Replays a fixed list of values, then yields `0.0` once exhausted.
///
/// Every zero handed out past the end is counted in [`FixedSource::padded`].
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: std::vec::IntoIter<f32>,
    padded: usize,
}

impl FixedSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values: values.into_iter(),
            padded: 0,
        }
    }

    /// Values not yet replayed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Zeros yielded after the list ran out.
    pub fn padded(&self) -> usize {
        self.padded
    }
}

impl SampleSource for FixedSource {
    fn next_sample(&mut self) -> f32 {
        match self.values.next() {
            Some(v) => v,
            None => {
                self.padded += 1;
                0.0
            }
        }
    }
}
