// src/optim/mod.rs
// Optimizers and learning-rate schedules.

pub mod lr_scheduler;
pub mod optimizer_trait;
pub mod sgd;

pub use lr_scheduler::{LrScheduler, StepLr};
pub use optimizer_trait::Optimizer;
pub use sgd::{Sgd, SgdOptions};
