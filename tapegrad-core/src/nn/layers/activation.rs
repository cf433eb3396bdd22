//! Parameter-free element-wise layers, so activations can sit inside a
//! [`Sequential`](crate::model::sequential::Sequential).

use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;

/// Logistic sigmoid layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Module for Sigmoid {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError> {
        graph.sigmoid(input)
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}

/// Rectified linear unit layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReLU;

impl Module for ReLU {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError> {
        graph.relu(input)
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}

/// Log-softmax over the class axis. Pair with [`Graph::nll_loss`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSoftmax;

impl Module for LogSoftmax {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError> {
        graph.log_softmax(input)
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
