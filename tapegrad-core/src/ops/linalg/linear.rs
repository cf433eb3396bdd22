// tapegrad-core/src/ops/linalg/linear.rs

use crate::autograd::backward_op::{value_of, wants_grad, InputGrads, Op};
use crate::autograd::{Graph, Node, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Affine map `input · weightᵗ + bias` (matrix-multiply-add).
    ///
    /// Shapes: `input [n, in]`, `weight [out, in]`, `bias [out]` → `[n, out]`.
    /// The bias row is added to every row of the product.
    pub fn linear(
        &mut self,
        input: NodeId,
        weight: NodeId,
        bias: Option<NodeId>,
    ) -> Result<NodeId, TapegradError> {
        let x = self.value(input)?;
        let w = self.value(weight)?;
        let (_, in_features) = x.dims2("linear")?;
        let (out_features, w_in) = w.dims2("linear")?;
        if in_features != w_in {
            return Err(TapegradError::IncompatibleShapes {
                shape1: x.shape().to_vec(),
                shape2: w.shape().to_vec(),
                operation: "linear".to_string(),
            });
        }
        let mut value = x.matmul(&w.transpose()?)?;

        if let Some(bias) = bias {
            let b = self.value(bias)?;
            if b.shape() != [out_features] {
                return Err(TapegradError::ShapeMismatch {
                    expected: vec![out_features],
                    actual: b.shape().to_vec(),
                    operation: "linear bias".to_string(),
                });
            }
            if out_features > 0 {
                for row in value.data_mut().chunks_mut(out_features) {
                    for (v, &bv) in row.iter_mut().zip(b.data()) {
                        *v += bv;
                    }
                }
            }
        }

        let mut inputs = vec![input, weight];
        inputs.extend(bias);
        Ok(self.record(value, &inputs, || Op::Linear {
            input,
            weight,
            bias,
        }))
    }
}

/// For `y = x·Wᵗ + b`: dx = g·W, dW = gᵗ·x, db = column sums of g.
pub(crate) fn linear_backward(
    grad_output: &Tensor,
    nodes: &[Node],
    input: NodeId,
    weight: NodeId,
    bias: Option<NodeId>,
) -> Result<InputGrads, TapegradError> {
    let mut grads = Vec::with_capacity(3);
    if wants_grad(nodes, input) {
        grads.push((input, grad_output.matmul(value_of(nodes, weight))?));
    }
    if wants_grad(nodes, weight) {
        let grad_t = grad_output.transpose()?;
        grads.push((weight, grad_t.matmul(value_of(nodes, input))?));
    }
    if let Some(bias) = bias {
        if wants_grad(nodes, bias) {
            grads.push((bias, grad_output.sum_axis0()?));
        }
    }
    Ok(grads)
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
