// src/nn/mod.rs
// Neural network building blocks: parameters, layers and the Module trait.

pub mod init;
pub mod layers;
pub mod module;
pub mod parameter;

pub use layers::activation::{LogSoftmax, ReLU, Sigmoid};
pub use layers::linear::Linear;
pub use module::Module;
pub use parameter::Parameter;
