// tapegrad-core/src/ops/reduction/sum.rs

use crate::autograd::backward_op::{value_of, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::{full, Tensor};

impl Graph {
    /// Sum of all elements, as a rank-0 scalar.
    pub fn sum(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let value = Tensor::scalar(self.value(input)?.sum());
        Ok(self.record(value, &[input], || Op::Sum { input }))
    }
}

/// Broadcasts the scalar upstream gradient back to the input shape.
pub(crate) fn sum_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
) -> Result<InputGrads, TapegradError> {
    let upstream = grad_output.item()?;
    Ok(vec![(input, full(value_of(nodes, input).shape(), upstream))])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
