use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;
use std::collections::BTreeMap;

/// The base trait for all neural network modules (layers, containers, etc.).
///
/// A module owns its [`Parameter`]s across many training steps. Each forward
/// pass is recorded on a caller-provided [`Graph`]: the module binds its
/// parameters into the graph with [`Graph::param`] and returns the id of its
/// output node.
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module.
    ///
    /// # Arguments
    /// * `graph`: The graph recording this pass.
    /// * `input`: Node holding the module input.
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError>;

    /// Returns every learnable parameter together with its name.
    ///
    /// Names are unique within the module and hierarchical for nested modules
    /// (e.g. `"0.weight"`, `"2.bias"`).
    fn named_parameters(&self) -> Vec<(String, Parameter)>;

    /// Returns every learnable parameter, in the same order as
    /// [`named_parameters`](Module::named_parameters).
    fn parameters(&self) -> Vec<Parameter> {
        self.named_parameters()
            .into_iter()
            .map(|(_, param)| param)
            .collect()
    }

    /// Snapshot of every parameter value, keyed by name.
    fn state_dict(&self) -> BTreeMap<String, Tensor> {
        self.named_parameters()
            .into_iter()
            .map(|(name, param)| {
                let value = param.value().clone();
                (name, value)
            })
            .collect()
    }

    /// Copies values from `state` into the module's parameters.
    ///
    /// Every parameter must be present with a matching shape. Entries that do
    /// not name a parameter are ignored.
    ///
    /// # Errors
    /// * `MissingParameter` if a parameter name has no entry.
    /// * `ShapeMismatch` if an entry has the wrong shape.
    fn load_state_dict(&self, state: &BTreeMap<String, Tensor>) -> Result<(), TapegradError> {
        let named = self.named_parameters();
        // Validate everything before touching any value.
        for (name, param) in &named {
            let value = state
                .get(name)
                .ok_or_else(|| TapegradError::MissingParameter(name.clone()))?;
            let expected = param.shape();
            if value.shape() != expected.as_slice() {
                return Err(TapegradError::ShapeMismatch {
                    expected,
                    actual: value.shape().to_vec(),
                    operation: format!("load_state_dict ({})", name),
                });
            }
        }
        if state.len() > named.len() {
            log::warn!(
                "load_state_dict: ignoring {} entries that name no parameter",
                state.len() - named.len()
            );
        }
        for (name, param) in named {
            if let Some(value) = state.get(&name) {
                param.set_value(value.clone())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "module_test.rs"]
mod tests;
