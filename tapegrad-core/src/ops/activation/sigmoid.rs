// tapegrad-core/src/ops/activation/sigmoid.rs

use crate::autograd::backward_op::{InputGrads, Op};
use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

/// Logistic function, split on the sign of `x` so `exp` never overflows.
pub(crate) fn sigmoid_scalar(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Graph {
    /// Element-wise logistic sigmoid `1 / (1 + e^-x)`.
    pub fn sigmoid(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let value = self.value(input)?.map(sigmoid_scalar);
        let output = value.clone();
        Ok(self.record(value, &[input], move || Op::Sigmoid { input, output }))
    }
}

/// dσ = g ⊙ s ⊙ (1 - s), with `s` the cached forward output.
pub(crate) fn sigmoid_backward(
    grad_output: &Tensor,
    input: NodeId,
    output: &Tensor,
) -> Result<InputGrads, TapegradError> {
    let grad = grad_output.zip_map(output, "sigmoid_backward", |g, s| g * s * (1.0 - s))?;
    Ok(vec![(input, grad)])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
