use super::traits::Dataset;
use tapegrad_core::{TapegradError, Tensor};

/// Labelled samples stored as one stacked input tensor.
///
/// `inputs` has the sample axis first (`[N, ...]`); `get(i)` returns row `i`
/// with the leading axis removed, together with `labels[i]`.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    inputs: Tensor,
    labels: Vec<usize>,
    row_len: usize,
}

impl TensorDataset {
    /// # Errors
    /// * `RankMismatch` if `inputs` is a scalar.
    /// * `ShapeMismatch` if the leading axis differs from `labels.len()`.
    pub fn new(inputs: Tensor, labels: Vec<usize>) -> Result<Self, TapegradError> {
        let Some(&rows) = inputs.shape().first() else {
            return Err(TapegradError::RankMismatch {
                expected: 1,
                actual: 0,
                operation: "TensorDataset::new".to_string(),
            });
        };
        if rows != labels.len() {
            return Err(TapegradError::ShapeMismatch {
                expected: vec![rows],
                actual: vec![labels.len()],
                operation: "TensorDataset::new (labels)".to_string(),
            });
        }
        let row_len = inputs.shape()[1..].iter().product();
        Ok(Self {
            inputs,
            labels,
            row_len,
        })
    }

    pub fn inputs(&self) -> &Tensor {
        &self.inputs
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl Dataset for TensorDataset {
    type Item = (Tensor, usize);

    fn get(&self, index: usize) -> Result<Self::Item, TapegradError> {
        let label = *self
            .labels
            .get(index)
            .ok_or_else(|| TapegradError::IndexOutOfBounds {
                index: vec![index],
                shape: self.inputs.shape().to_vec(),
            })?;
        let start = index * self.row_len;
        let row = self.inputs.data()[start..start + self.row_len].to_vec();
        let sample = Tensor::new(row, self.inputs.shape()[1..].to_vec())?;
        Ok((sample, label))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}
