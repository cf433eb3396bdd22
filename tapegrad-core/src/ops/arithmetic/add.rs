// tapegrad-core/src/ops/arithmetic/add.rs

use crate::autograd::backward_op::{InputGrads, Op};
use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Element-wise `lhs + rhs`. Both operands must have the same shape.
    pub fn add(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId, TapegradError> {
        let value = self.value(lhs)?.add(self.value(rhs)?)?;
        Ok(self.record(value, &[lhs, rhs], || Op::Add { lhs, rhs }))
    }
}

/// d(a + b) = (g, g)
pub(crate) fn add_backward(grad_output: &Tensor, lhs: NodeId, rhs: NodeId) -> InputGrads {
    vec![(lhs, grad_output.clone()), (rhs, grad_output.clone())]
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
