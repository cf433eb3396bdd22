// tapegrad-core/src/ops/view/reshape.rs

use crate::autograd::backward_op::{value_of, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Same elements, new shape. The element count must not change.
    pub fn reshape(&mut self, input: NodeId, shape: Vec<usize>) -> Result<NodeId, TapegradError> {
        let value = self.value(input)?.reshape(shape)?;
        Ok(self.record(value, &[input], || Op::Reshape { input }))
    }

    /// Collapses every axis after the first: `[n, d1, d2, ..]` becomes `[n, d1·d2·..]`.
    ///
    /// A rank-1 input `[n]` becomes `[n, 1]`.
    pub fn flatten(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let x = self.value(input)?;
        let batch = match x.shape().first() {
            Some(&n) => n,
            None => {
                return Err(TapegradError::RankMismatch {
                    expected: 1,
                    actual: 0,
                    operation: "flatten".to_string(),
                })
            }
        };
        let rest: usize = x.shape()[1..].iter().product();
        self.reshape(input, vec![batch, rest])
    }
}

pub(crate) fn reshape_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
) -> Result<InputGrads, TapegradError> {
    let grad = grad_output.reshape(value_of(nodes, input).shape().to_vec())?;
    Ok(vec![(input, grad)])
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
