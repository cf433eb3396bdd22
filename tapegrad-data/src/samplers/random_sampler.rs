// tapegrad-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// A sampler that randomly samples indices from a dataset.
///
/// With a seed, every call to `iter` (one per epoch) draws a different order,
/// and the whole sequence of orders is the same on every run.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    seed: Option<u64>,
    epoch: AtomicU64,
}

impl RandomSampler {
    /// Creates a new unseeded `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The total number of samples to draw. If `None`, it defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            seed: None,
            epoch: AtomicU64::new(0),
        }
    }

    /// A permutation sampler whose epoch orders are reproducible for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(false, None).with_seed(seed)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(epoch.wrapping_mul(0x9E37_79B9_7F4A_7C15))),
            None => StdRng::from_entropy(),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }

        let mut rng = self.rng();
        let actual_num_samples = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..actual_num_samples)
                .map(|_| rng.gen_range(0..dataset_len))
                .collect();
            Box::new(indices.into_iter())
        } else {
            if actual_num_samples > dataset_len {
                log::warn!(
                    "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement; drawing {} samples",
                    actual_num_samples,
                    dataset_len,
                    dataset_len
                );
            }
            let mut indices: Vec<usize> = (0..dataset_len).collect();
            indices.shuffle(&mut rng);
            indices.truncate(actual_num_samples);
            Box::new(indices.into_iter())
        }
    }

    fn len(&self, dataset_len: usize) -> usize {
        let requested = self.num_samples.unwrap_or(dataset_len);
        if self.replacement {
            requested
        } else {
            requested.min(dataset_len)
        }
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
