// dataloader.rs
//! # DataLoader
//!
//! Groups dataset samples into batches, in the order chosen by a [`Sampler`].
//!
//! The loader is restartable: every call to [`DataLoader::iter`] asks the
//! sampler for a fresh order, so one loader serves every epoch.
//!
//! ```rust
//! use tapegrad_data::dataloader::DataLoader;
//! use tapegrad_data::datasets::VecDataset;
//! use tapegrad_data::samplers::SequentialSampler;
//!
//! let dataset = VecDataset::new(vec![1, 2, 3, 4, 5, 6]);
//! let loader = DataLoader::with_default_collate(dataset, 2, SequentialSampler::new(), false).unwrap();
//! let batches: Vec<Vec<i32>> = loader.iter().map(|b| b.unwrap()).collect();
//! assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
//! ```

use crate::collate::collate_labeled;
use crate::datasets::Dataset;
use crate::samplers::Sampler;
use std::fmt;
use tapegrad_core::{Batch, BatchSource, TapegradError, Tensor};

/// Collation function: turns the samples of one batch into the batch value.
pub type CollateFn<D, B> =
    Box<dyn Fn(Vec<<D as Dataset>::Item>) -> Result<B, TapegradError> + Send + Sync>;

/// Batching and sampling over a [`Dataset`].
///
/// # Type parameters
/// - `D`: the dataset.
/// - `S`: the sampler producing indices each epoch.
/// - `B`: the collated batch type.
pub struct DataLoader<D: Dataset, S: Sampler, B> {
    /// The source dataset.
    pub dataset: D,
    pub batch_size: usize,
    pub sampler: S,
    /// If true, a final batch smaller than `batch_size` is skipped.
    pub drop_last: bool,
    collate_fn: CollateFn<D, B>,
}

impl<D: Dataset, S: Sampler, B> DataLoader<D, S, B> {
    /// Creates a new DataLoader.
    ///
    /// # Errors
    /// `InvalidConfig` if `batch_size` is zero.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: CollateFn<D, B>,
    ) -> Result<Self, TapegradError> {
        if batch_size == 0 {
            return Err(TapegradError::InvalidConfig(
                "DataLoader batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            collate_fn,
        })
    }

    /// Starts a new pass over the dataset.
    pub fn iter(&self) -> DataLoaderIter<'_, D, S, B> {
        DataLoaderIter {
            loader: self,
            indices: self.sampler.iter(self.dataset.len()),
        }
    }

    /// Number of batches one pass yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            (samples + self.batch_size - 1) / self.batch_size
        }
    }
}

impl<D, S> DataLoader<D, S, Vec<D::Item>>
where
    D: Dataset,
    D::Item: 'static,
    S: Sampler,
{
    /// Creates a DataLoader whose batches are plain `Vec`s of samples.
    pub fn with_default_collate(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
    ) -> Result<Self, TapegradError> {
        Self::new(dataset, batch_size, sampler, drop_last, Box::new(collect_samples::<D::Item>))
    }
}

impl<D, S> DataLoader<D, S, Batch>
where
    D: Dataset<Item = (Tensor, usize)>,
    S: Sampler,
{
    /// Creates a DataLoader over labelled samples that yields stacked [`Batch`]es.
    pub fn labeled(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
    ) -> Result<Self, TapegradError> {
        Self::new(dataset, batch_size, sampler, drop_last, Box::new(collate_labeled))
    }
}

fn collect_samples<T>(samples: Vec<T>) -> Result<Vec<T>, TapegradError> {
    Ok(samples)
}

impl<D: Dataset, S: Sampler, B> fmt::Debug for DataLoader<D, S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataLoader")
            .field("dataset_len", &self.dataset.len())
            .field("batch_size", &self.batch_size)
            .field("sampler", &self.sampler)
            .field("drop_last", &self.drop_last)
            .finish()
    }
}

/// One pass of a [`DataLoader`].
pub struct DataLoaderIter<'a, D: Dataset, S: Sampler, B> {
    loader: &'a DataLoader<D, S, B>,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<'a, D: Dataset, S: Sampler, B> Iterator for DataLoaderIter<'a, D, S, B> {
    type Item = Result<B, TapegradError>;

    /// Fetches the next `batch_size` samples and collates them.
    ///
    /// A failing `get` or collation is yielded as `Some(Err(_))`.
    fn next(&mut self) -> Option<Self::Item> {
        let batch_size = self.loader.batch_size;
        let mut samples = Vec::with_capacity(batch_size);
        for idx in self.indices.by_ref().take(batch_size) {
            match self.loader.dataset.get(idx) {
                Ok(item) => samples.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if samples.is_empty() || (self.loader.drop_last && samples.len() < batch_size) {
            return None;
        }
        Some((self.loader.collate_fn)(samples))
    }
}

impl<D, S> BatchSource for DataLoader<D, S, Batch>
where
    D: Dataset,
    S: Sampler,
{
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapegradError>> + '_> {
        log::trace!(
            "DataLoader: starting pass of {} batches",
            self.num_batches()
        );
        Box::new(self.iter())
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
