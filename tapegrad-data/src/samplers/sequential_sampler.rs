use super::traits::Sampler;

/// Visits indices `0..len` in order.
///
/// Stateless: every call to [`Sampler::iter`] yields the same order, so a
/// [`DataLoader`](crate::DataLoader) built on it replays identical batches
/// each epoch. Use it for evaluation or when the data is already shuffled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialSampler;

impl SequentialSampler {
    pub fn new() -> Self {
        SequentialSampler
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        log::trace!("SequentialSampler: pass over {} indices", dataset_len);
        Box::new(0..dataset_len)
    }

    /// Always the full dataset; nothing is skipped or repeated.
    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
