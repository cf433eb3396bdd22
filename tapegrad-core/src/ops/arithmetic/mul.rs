// tapegrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::backward_op::{value_of, wants_grad, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Element-wise (Hadamard) product. Both operands must have the same shape.
    pub fn mul(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId, TapegradError> {
        let value = self.value(lhs)?.mul(self.value(rhs)?)?;
        Ok(self.record(value, &[lhs, rhs], || Op::Mul { lhs, rhs }))
    }

    /// Multiplies every element by a constant.
    pub fn scale(&mut self, input: NodeId, factor: f64) -> Result<NodeId, TapegradError> {
        let value = self.value(input)?.scale(factor);
        Ok(self.record(value, &[input], || Op::Scale { input, factor }))
    }

    /// `input ⊙ input`, recorded as a product of the node with itself.
    pub fn square(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        self.mul(input, input)
    }
}

/// d(a ⊙ b) = (g ⊙ b, g ⊙ a)
pub(crate) fn mul_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    lhs: NodeId,
    rhs: NodeId,
) -> Result<InputGrads, TapegradError> {
    let mut grads = Vec::with_capacity(2);
    if wants_grad(nodes, lhs) {
        grads.push((lhs, grad_output.mul(value_of(nodes, rhs))?));
    }
    if wants_grad(nodes, rhs) {
        grads.push((rhs, grad_output.mul(value_of(nodes, lhs))?));
    }
    Ok(grads)
}

/// d(k·a) = k·g
pub(crate) fn scale_backward(grad_output: &Tensor, input: NodeId, factor: f64) -> InputGrads {
    vec![(input, grad_output.scale(factor))]
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
