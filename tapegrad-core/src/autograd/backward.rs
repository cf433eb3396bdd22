use crate::autograd::graph::{topological_sort, Graph, NodeId, Origin};
use crate::error::TapegradError;
use crate::tensor::{ones, Tensor};

impl Graph {
    /// Backpropagates from a scalar `output` and releases the graph behind it.
    ///
    /// Gradients are accumulated (never overwritten) into the slots of tracked
    /// leaves and of the parameters bound to them. Afterwards every operation
    /// record reached from `output` is dropped; a second call on the same
    /// output fails with `GraphConsumed`. Use [`backward_retained`](Graph::backward_retained)
    /// to keep the records.
    ///
    /// # Errors
    /// * `BackwardNonScalar` if `output` holds more than one element.
    /// * `GraphConsumed` if the records behind `output` were already released.
    /// * `InvalidNode` if `output` is not a node of this graph.
    pub fn backward(&mut self, output: NodeId) -> Result<(), TapegradError> {
        self.run_backward(output, false)
    }

    /// Same as [`backward`](Graph::backward) but keeps every operation record
    /// so the graph can be differentiated again.
    pub fn backward_retained(&mut self, output: NodeId) -> Result<(), TapegradError> {
        self.run_backward(output, true)
    }

    fn run_backward(&mut self, output: NodeId, retain_graph: bool) -> Result<(), TapegradError> {
        let root = self.node(output)?;
        if !root.value.is_scalar() {
            return Err(TapegradError::BackwardNonScalar {
                shape: root.value.shape().to_vec(),
            });
        }
        if matches!(root.origin, Origin::Released) {
            return Err(TapegradError::GraphConsumed { node: output.0 });
        }
        if !root.requires_grad {
            log::warn!(
                "backward called on node {} which does not track gradients; nothing to do",
                output.0
            );
            return Ok(());
        }
        let seed = ones(root.value.shape());

        let order = topological_sort(&self.nodes, output)?;
        log::debug!(
            "backward from node {} over {} of {} nodes (retain_graph={})",
            output.0,
            order.len(),
            self.nodes.len(),
            retain_graph
        );

        let mut pending: Vec<Option<Tensor>> = vec![None; self.nodes.len()];
        pending[output.0] = Some(seed);
        let mut reached_leaves = Vec::new();

        for &id in order.iter().rev() {
            let Some(upstream) = pending[id.0].take() else {
                continue;
            };
            match &self.nodes[id.0].origin {
                Origin::Op(op) => {
                    for (input, contribution) in op.backward(&upstream, &self.nodes)? {
                        match &mut pending[input.0] {
                            Some(acc) => acc.add_assign(&contribution)?,
                            slot @ None => *slot = Some(contribution),
                        }
                    }
                }
                Origin::Leaf => reached_leaves.push((id, upstream)),
                Origin::Released => return Err(TapegradError::GraphConsumed { node: id.0 }),
            }
        }

        for (id, grad) in reached_leaves {
            let node = &mut self.nodes[id.0];
            if let Some(param) = &node.binding {
                param.acc_grad(&grad)?;
            }
            match node.grad.as_mut() {
                Some(existing) => existing.add_assign(&grad)?,
                None => node.grad = Some(grad),
            }
        }

        if !retain_graph {
            for id in order {
                let node = &mut self.nodes[id.0];
                if matches!(node.origin, Origin::Op(_)) {
                    node.origin = Origin::Released;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
