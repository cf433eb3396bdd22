// tapegrad-core/src/ops/activation/relu.rs

use crate::autograd::backward_op::{value_of, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
    /// ReLU(x) = max(0, x)
    pub fn relu(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let value = self.value(input)?.map(|x| if x > 0.0 { x } else { 0.0 });
        Ok(self.record(value, &[input], || Op::Relu { input }))
    }
}

/// Passes `g` through where the forward input was strictly positive.
pub(crate) fn relu_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
) -> Result<InputGrads, TapegradError> {
    let grad = grad_output.zip_map(value_of(nodes, input), "relu_backward", |g, x| {
        if x > 0.0 {
            g
        } else {
            0.0
        }
    })?;
    Ok(vec![(input, grad)])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
