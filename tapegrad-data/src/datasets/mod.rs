pub mod blobs;
pub mod tensor_dataset;
pub mod traits;
pub mod vec_dataset;

pub use blobs::{gaussian_blobs, BlobsConfig};
pub use tensor_dataset::TensorDataset;
pub use traits::Dataset;
pub use vec_dataset::{LabeledDataset, VecDataset};
