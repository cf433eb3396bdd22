//! Datasets, samplers and batch loading for tapegrad.
//!
//! A [`DataLoader`] over labelled samples implements
//! [`BatchSource`](tapegrad_core::BatchSource), so it plugs straight into
//! [`Trainer::fit`](tapegrad_core::Trainer::fit).

pub mod collate;
pub mod dataloader;
pub mod datasets;
pub mod samplers;

// Re-export main components
pub use collate::collate_labeled;
pub use dataloader::DataLoader;
pub use datasets::{gaussian_blobs, BlobsConfig, Dataset, LabeledDataset, TensorDataset, VecDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
