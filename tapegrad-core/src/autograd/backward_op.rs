use crate::autograd::graph::{Node, NodeId};
use crate::error::TapegradError;
use crate::ops;
use crate::tensor::Tensor;

/// Operation record stored on a non-leaf node.
///
/// Each variant holds the ids of its inputs plus whatever forward values the
/// local derivative needs. Inputs always have smaller ids than the node that
/// records them.
#[derive(Debug)]
pub(crate) enum Op {
    Add { lhs: NodeId, rhs: NodeId },
    Sub { lhs: NodeId, rhs: NodeId },
    Mul { lhs: NodeId, rhs: NodeId },
    Scale { input: NodeId, factor: f64 },
    MatMul { lhs: NodeId, rhs: NodeId },
    /// `input · weightᵗ + bias`
    Linear {
        input: NodeId,
        weight: NodeId,
        bias: Option<NodeId>,
    },
    Sigmoid { input: NodeId, output: Tensor },
    Relu { input: NodeId },
    LogSoftmax { input: NodeId, softmax: Tensor },
    NllLoss { input: NodeId, labels: Vec<usize> },
    Sum { input: NodeId },
    Mean { input: NodeId },
    Reshape { input: NodeId },
}

/// Gradient contributions produced by one local-gradient rule.
pub(crate) type InputGrads = Vec<(NodeId, Tensor)>;

impl Op {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Sub { .. } => "sub",
            Op::Mul { .. } => "mul",
            Op::Scale { .. } => "scale",
            Op::MatMul { .. } => "matmul",
            Op::Linear { .. } => "linear",
            Op::Sigmoid { .. } => "sigmoid",
            Op::Relu { .. } => "relu",
            Op::LogSoftmax { .. } => "log_softmax",
            Op::NllLoss { .. } => "nll_loss",
            Op::Sum { .. } => "sum",
            Op::Mean { .. } => "mean",
            Op::Reshape { .. } => "reshape",
        }
    }

    /// Ids of the nodes this record was computed from, in argument order.
    pub(crate) fn inputs(&self) -> Vec<NodeId> {
        match self {
            Op::Add { lhs, rhs }
            | Op::Sub { lhs, rhs }
            | Op::Mul { lhs, rhs }
            | Op::MatMul { lhs, rhs } => vec![*lhs, *rhs],
            Op::Linear {
                input,
                weight,
                bias,
            } => {
                let mut ids = vec![*input, *weight];
                ids.extend(bias.iter().copied());
                ids
            }
            Op::Scale { input, .. }
            | Op::Sigmoid { input, .. }
            | Op::Relu { input }
            | Op::LogSoftmax { input, .. }
            | Op::NllLoss { input, .. }
            | Op::Sum { input }
            | Op::Mean { input }
            | Op::Reshape { input } => vec![*input],
        }
    }

    /// Maps the gradient flowing into this node to contributions for its inputs.
    ///
    /// Only inputs that track gradients receive a contribution.
    pub(crate) fn backward(
        &self,
        grad_output: &Tensor,
        nodes: &[Node],
    ) -> Result<InputGrads, TapegradError> {
        let grads = match self {
            Op::Add { lhs, rhs } => ops::arithmetic::add::add_backward(grad_output, *lhs, *rhs),
            Op::Sub { lhs, rhs } => ops::arithmetic::sub::sub_backward(grad_output, *lhs, *rhs),
            Op::Mul { lhs, rhs } => {
                ops::arithmetic::mul::mul_backward(grad_output, nodes, *lhs, *rhs)?
            }
            Op::Scale { input, factor } => {
                ops::arithmetic::mul::scale_backward(grad_output, *input, *factor)
            }
            Op::MatMul { lhs, rhs } => {
                ops::linalg::matmul::matmul_backward(grad_output, nodes, *lhs, *rhs)?
            }
            Op::Linear {
                input,
                weight,
                bias,
            } => ops::linalg::linear::linear_backward(grad_output, nodes, *input, *weight, *bias)?,
            Op::Sigmoid { input, output } => {
                ops::activation::sigmoid::sigmoid_backward(grad_output, *input, output)?
            }
            Op::Relu { input } => ops::activation::relu::relu_backward(grad_output, nodes, *input)?,
            Op::LogSoftmax { input, softmax } => {
                ops::activation::log_softmax::log_softmax_backward(grad_output, *input, softmax)?
            }
            Op::NllLoss { input, labels } => {
                ops::loss::nll_loss::nll_loss_backward(grad_output, nodes, *input, labels)?
            }
            Op::Sum { input } => ops::reduction::sum::sum_backward(grad_output, nodes, *input)?,
            Op::Mean { input } => ops::reduction::mean::mean_backward(grad_output, nodes, *input)?,
            Op::Reshape { input } => {
                ops::view::reshape::reshape_backward(grad_output, nodes, *input)?
            }
        };
        Ok(grads
            .into_iter()
            .filter(|(id, _)| nodes[id.0].requires_grad)
            .collect())
    }
}

/// Forward value of `id`, for use inside local-gradient rules.
pub(crate) fn value_of(nodes: &[Node], id: NodeId) -> &Tensor {
    &nodes[id.0].value
}

/// Whether `id` should receive a gradient contribution.
pub(crate) fn wants_grad(nodes: &[Node], id: NodeId) -> bool {
    nodes[id.0].requires_grad
}
