// tapegrad-core/src/ops/activation/log_softmax.rs

use crate::autograd::backward_op::{InputGrads, Op};
use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Graph {
    /// Log-softmax over the last (class) axis.
    ///
    /// Uses the log-sum-exp form with the row maximum subtracted, so large
    /// logits do not overflow. A row containing `+inf` yields `-ln k` at its
    /// `k` infinite entries and `-inf` elsewhere instead of NaN. Works for any rank ≥ 1; rank-2 `[batch, classes]`
    /// is the usual case.
    pub fn log_softmax(&mut self, input: NodeId) -> Result<NodeId, TapegradError> {
        let x = self.value(input)?;
        if x.rank() == 0 {
            return Err(TapegradError::RankMismatch {
                expected: 1,
                actual: 0,
                operation: "log_softmax".to_string(),
            });
        }
        let (_, width) = x.last_axis_rows();
        let lse = x.logsumexp_rows();
        let mut value = x.clone();
        if width > 0 {
            for (row, offset) in value.data_mut().chunks_mut(width).zip(lse) {
                if offset == f64::INFINITY {
                    saturated_row(row);
                    continue;
                }
                for v in row.iter_mut() {
                    *v -= offset;
                }
            }
        }
        let softmax = value.map(f64::exp);
        Ok(self.record(value, &[input], move || Op::LogSoftmax { input, softmax }))
    }
}

/// Limit of log-softmax for a row holding `+inf`: the `k` infinite entries
/// share the mass (`-ln k`) and every finite entry gets `-inf`.
fn saturated_row(row: &mut [f64]) {
    let k = row.iter().filter(|v| **v == f64::INFINITY).count() as f64;
    for v in row.iter_mut() {
        *v = if *v == f64::INFINITY {
            -k.ln()
        } else {
            f64::NEG_INFINITY
        };
    }
}

/// dx_i = g_i - softmax_i · Σ_j g_j, row by row.
pub(crate) fn log_softmax_backward(
    grad_output: &Tensor,
    input: NodeId,
    softmax: &Tensor,
) -> Result<InputGrads, TapegradError> {
    softmax.check_same_shape(grad_output, "log_softmax_backward")?;
    let (_, width) = softmax.last_axis_rows();
    let mut grad = grad_output.clone();
    if width > 0 {
        for (g_row, p_row) in grad
            .data_mut()
            .chunks_mut(width)
            .zip(softmax.data().chunks(width))
        {
            let total: f64 = g_row.iter().sum();
            for (g, &p) in g_row.iter_mut().zip(p_row) {
                *g -= p * total;
            }
        }
    }
    Ok(vec![(input, grad)])
}

#[cfg(test)]
#[path = "log_softmax_test.rs"]
mod tests;
