//! Reverse-mode automatic differentiation over dense `f64` tensors, with the
//! layers, optimizer and training loop needed to fit small classifiers.
//!
//! Each forward pass is recorded on a [`Graph`]. Learnable state lives in
//! [`Parameter`] handles owned by [`Module`]s and survives across graphs.

// Déclare les modules principaux de la crate
pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod train;

pub use autograd::{GradMode, Graph, NodeId};
pub use error::TapegradError;
pub use model::Sequential;
pub use nn::{Module, Parameter};
pub use optim::{Optimizer, Sgd, SgdOptions};
pub use tensor::Tensor;
pub use train::{Batch, BatchSource, TrainConfig, Trainer};
// Re-export traits required by public functions/structs
pub use num_traits;
