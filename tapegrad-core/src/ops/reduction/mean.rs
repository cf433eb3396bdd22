// tapegrad-core/src/ops/reduction/mean.rs

use crate::autograd::backward_op::{value_of, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::{full, Tensor};

impl Graph {
    /// Arithmetic mean of all elements, as a rank-0 scalar.
    ///
    /// # Errors
    /// `EmptyBatch` if the input has no elements.
    pub fn mean(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let x = self.value(input)?;
        if x.numel() == 0 {
            return Err(TapegradError::EmptyBatch {
                operation: "mean".to_string(),
            });
        }
        let value = Tensor::scalar(x.mean());
        Ok(self.record(value, &[input], || Op::Mean { input }))
    }
}

/// Every element receives `g / numel`.
pub(crate) fn mean_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
) -> Result<InputGrads, TapegradError> {
    let upstream = grad_output.item()?;
    let x = value_of(nodes, input);
    let share = upstream / x.numel() as f64;
    Ok(vec![(input, full(x.shape(), share))])
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
