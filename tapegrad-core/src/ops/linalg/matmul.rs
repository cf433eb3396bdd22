// tapegrad-core/src/ops/linalg/matmul.rs

use crate::autograd::backward_op::{value_of, wants_grad, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Matrix product of two rank-2 nodes: `[m, k] x [k, n] -> [m, n]`.
    ///
    /// # Errors
    /// `RankMismatch` if either operand is not a matrix, `IncompatibleShapes`
    /// if the inner dimensions differ.
    pub fn matmul(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId, TapegradError> {
        let value = self.value(lhs)?.matmul(self.value(rhs)?)?;
        Ok(self.record(value, &[lhs, rhs], || Op::MatMul { lhs, rhs }))
    }
}

/// For `C = A·B`: dA = g·Bᵗ, dB = Aᵗ·g
pub(crate) fn matmul_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    lhs: NodeId,
    rhs: NodeId,
) -> Result<InputGrads, TapegradError> {
    let mut grads = Vec::with_capacity(2);
    if wants_grad(nodes, lhs) {
        let rhs_t = value_of(nodes, rhs).transpose()?;
        grads.push((lhs, grad_output.matmul(&rhs_t)?));
    }
    if wants_grad(nodes, rhs) {
        let lhs_t = value_of(nodes, lhs).transpose()?;
        grads.push((rhs, lhs_t.matmul(grad_output)?));
    }
    Ok(grads)
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
