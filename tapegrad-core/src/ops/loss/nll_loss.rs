// tapegrad-core/src/ops/loss/nll_loss.rs

use crate::autograd::backward_op::{value_of, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::{zeros, Tensor};

impl Graph {
    /// Negative log-likelihood averaged over the batch.
    ///
    /// `input` holds log-probabilities of shape `[batch, classes]` and
    /// `labels[i]` is the class index of row `i`. The result is a scalar:
    /// `-(1/batch) · Σ_i input[i, labels[i]]`.
    ///
    /// # Errors
    /// * `RankMismatch` if `input` is not rank 2.
    /// * `ShapeMismatch` if `labels.len()` differs from the batch size.
    /// * `EmptyBatch` if the batch is empty.
    /// * `InvalidLabel` if a label is not below the number of classes.
    pub fn nll_loss(&mut self, input: NodeId, labels: &[usize]) -> Result<NodeId, TapegradError> {
        let log_probs = self.value(input)?;
        let (batch, classes) = log_probs.dims2("nll_loss")?;
        if labels.len() != batch {
            return Err(TapegradError::ShapeMismatch {
                expected: vec![batch],
                actual: vec![labels.len()],
                operation: "nll_loss (labels)".to_string(),
            });
        }
        if batch == 0 {
            return Err(TapegradError::EmptyBatch {
                operation: "nll_loss".to_string(),
            });
        }
        let mut total = 0.0;
        for (index, &label) in labels.iter().enumerate() {
            if label >= classes {
                return Err(TapegradError::InvalidLabel {
                    label,
                    index,
                    num_classes: classes,
                });
            }
            total += log_probs.data()[index * classes + label];
        }
        let value = Tensor::scalar(-total / batch as f64);
        Ok(self.record(value, &[input], || Op::NllLoss {
            input,
            labels: labels.to_vec(),
        }))
    }

    /// Mean cross-entropy between raw scores `[batch, classes]` and integer labels.
    ///
    /// Recorded as [`log_softmax`](Graph::log_softmax) followed by
    /// [`nll_loss`](Graph::nll_loss).
    pub fn cross_entropy(&mut self, logits: NodeId, labels: &[usize]) -> Result<NodeId, TapegradError> {
        let log_probs = self.log_softmax(logits)?;
        self.nll_loss(log_probs, labels)
    }
}

/// Every row gets `-g / batch` at its label position and zero elsewhere.
pub(crate) fn nll_loss_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
    labels: &[usize],
) -> Result<InputGrads, TapegradError> {
    let upstream = grad_output.item()?;
    let shape = value_of(nodes, input).shape();
    let classes = shape.get(1).copied().unwrap_or(0);
    let mut grad = zeros(shape);
    let weight = -upstream / labels.len() as f64;
    for (row, &label) in labels.iter().enumerate() {
        grad.data_mut()[row * classes + label] = weight;
    }
    Ok(vec![(input, grad)])
}

#[cfg(test)]
#[path = "nll_loss_test.rs"]
mod tests;
