// tapegrad-data/src/collate.rs

use tapegrad_core::{Batch, TapegradError, Tensor};

/// Stacks `(input, label)` samples into one [`Batch`].
///
/// Inputs are stacked along a new leading axis, so `k` samples of shape
/// `[d1, d2, ..]` become `[k, d1, d2, ..]`.
///
/// # Errors
/// `EmptyTensorList` for an empty slice, `ShapeMismatch` if sample shapes differ.
pub fn collate_labeled(samples: Vec<(Tensor, usize)>) -> Result<Batch, TapegradError> {
    let (inputs, labels): (Vec<Tensor>, Vec<usize>) = samples.into_iter().unzip();
    Batch::new(Tensor::stack(&inputs)?, labels)
}
