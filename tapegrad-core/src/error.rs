use thiserror::Error;

/// Custom error type for the tapegrad framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum TapegradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch during {operation}: expected {expected}, got {actual}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Cannot stack an empty list of tensors")]
    EmptyTensorList,

    #[error("Backward called on non-scalar tensor of shape {shape:?}")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Graph for node {node} was already consumed by a backward pass; use backward_retained to backpropagate more than once")]
    GraphConsumed { node: usize },

    #[error("Optimizer step called before any backward pass populated gradients")]
    NoGradients,

    #[error("Node {node} does not belong to this graph (graph holds {len} nodes)")]
    InvalidNode { node: usize, len: usize },

    #[error("Label {label} at batch index {index} is out of range for {num_classes} classes")]
    InvalidLabel {
        label: usize,
        index: usize,
        num_classes: usize,
    },

    #[error("Operation {operation} received an empty batch")]
    EmptyBatch { operation: String },

    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: String, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parameter '{0}' is missing from the state dict")]
    MissingParameter(String),
}
