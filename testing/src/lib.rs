//! Test utilities: random request generation for tests and benchmarks.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Produces `(blocks, deadline)` pairs with blocks drawn uniformly from `1..=max_blocks` and
/// whole-second deadlines drawn uniformly from `1..=max_deadline`.
#[derive(Debug, Clone)]
pub struct UniformRequestDistribution {
    blocks: Uniform<u64>,
    deadline: Uniform<u32>,
}

impl UniformRequestDistribution {
    /// Constructs a new distribution.
    ///
    /// # Panics
    ///
    /// Panics if either maximum is zero.
    #[must_use]
    pub fn new(max_blocks: u64, max_deadline: u32) -> Self {
        assert!(max_blocks > 0 && max_deadline > 0, "maximums must be positive");
        Self {
            blocks: Uniform::new_inclusive(1, max_blocks),
            deadline: Uniform::new_inclusive(1, max_deadline),
        }
    }
}

impl Distribution<(u64, f64)> for UniformRequestDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (u64, f64) {
        (
            self.blocks.sample(rng),
            f64::from(self.deadline.sample(rng)),
        )
    }
}

/// Samples `size` request pairs.
pub fn random_pairs<R: Rng>(
    rng: &mut R,
    size: usize,
    distribution: &UniformRequestDistribution,
) -> Vec<(u64, f64)> {
    distribution.sample_iter(rng).take(size).collect()
}
