use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use std::collections::HashSet;

/// Chains modules, feeding each one's output to the next.
///
/// Children are named by position (`"0"`, `"1"`, …) and parameter names are
/// prefixed accordingly, e.g. `"0.weight"`.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends `module` and returns `self`, for builder-style construction.
    pub fn with<M: Module + 'static>(mut self, module: M) -> Self {
        self.push(module);
        self
    }

    pub fn push<M: Module + 'static>(&mut self, module: M) {
        self.modules.push(Box::new(module));
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Module> {
        self.modules.get(index).map(|m| m.as_ref())
    }
}

impl Module for Sequential {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError> {
        let mut current = input;
        for module in &self.modules {
            current = module.forward(graph, current)?;
        }
        Ok(current)
    }

    /// A parameter shared by several children is listed once, under the name
    /// of its first occurrence.
    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        let mut seen = HashSet::new();
        let mut params = Vec::new();
        for (index, module) in self.modules.iter().enumerate() {
            for (param_name, param) in module.named_parameters() {
                if seen.insert(param.id()) {
                    params.push((format!("{}.{}", index, param_name), param));
                }
            }
        }
        params
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
