// src/train/mod.rs
// Training loop glue: batches, configuration and the trainer itself.

pub mod batch;
pub mod config;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use config::{LossKind, TrainConfig};
pub use trainer::{EpochReport, Evaluation, Trainer};
