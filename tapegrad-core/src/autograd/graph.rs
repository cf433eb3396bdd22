use crate::autograd::backward_op::Op;
use crate::error::TapegradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Index of a node inside a [`Graph`] arena. Ids are handed out in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether operations recorded on a graph track gradients.
///
/// The mode belongs to one `Graph` value and is passed around with it; there
/// is no process-wide switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradMode {
    #[default]
    Enabled,
    Disabled,
}

/// How a node came to be.
#[derive(Debug)]
pub(crate) enum Origin {
    /// Created directly (input, constant or parameter). No operation record.
    Leaf,
    /// Produced by a recorded operation.
    Op(Op),
    /// Produced by an operation whose record was dropped after backward.
    Released,
}

/// One entry of the computation graph arena.
#[derive(Debug)]
pub struct Node {
    pub(crate) value: Tensor,
    pub(crate) requires_grad: bool,
    pub(crate) grad: Option<Tensor>,
    pub(crate) origin: Origin,
    pub(crate) binding: Option<Parameter>,
}

impl Node {
    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// A leaf has no operation record and never had one.
    pub fn is_leaf(&self) -> bool {
        matches!(self.origin, Origin::Leaf)
    }

    /// Name of the recording operation, if the record is still alive.
    pub fn op_name(&self) -> Option<&'static str> {
        match &self.origin {
            Origin::Op(op) => Some(op.name()),
            _ => None,
        }
    }
}

/// Arena holding every node produced during one forward pass.
///
/// Operation records store [`NodeId`]s of their inputs rather than owning
/// them, so the graph has no reference cycles and is released wholesale when
/// the `Graph` is dropped. Build a fresh graph for each forward pass.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    mode: GradMode,
    bound_params: HashMap<usize, NodeId>,
}

impl Graph {
    /// Creates an empty graph that records operations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: GradMode) -> Self {
        Graph {
            mode,
            ..Self::default()
        }
    }

    /// Creates an empty graph that never records operations.
    pub fn inference() -> Self {
        Self::with_mode(GradMode::Disabled)
    }

    pub fn mode(&self) -> GradMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GradMode) {
        self.mode = mode;
    }

    /// Runs `f` with recording disabled, then restores the previous mode.
    pub fn no_grad<R>(&mut self, f: impl FnOnce(&mut Graph) -> R) -> R {
        let previous = std::mem::replace(&mut self.mode, GradMode::Disabled);
        let result = f(self);
        self.mode = previous;
        result
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a leaf node holding `value`.
    pub fn leaf(&mut self, value: Tensor, requires_grad: bool) -> NodeId {
        self.push(Node {
            value,
            requires_grad,
            grad: None,
            origin: Origin::Leaf,
            binding: None,
        })
    }

    /// Adds an untracked leaf (input data or a constant).
    pub fn input(&mut self, value: Tensor) -> NodeId {
        self.leaf(value, false)
    }

    /// Adds a tracked leaf bound to `param`, or returns the existing one.
    ///
    /// Every backward pass adds the gradient reaching this leaf into the
    /// parameter's own gradient slot.
    pub fn param(&mut self, param: &Parameter) -> NodeId {
        if let Some(&id) = self.bound_params.get(&param.id()) {
            return id;
        }
        let value = param.value().clone();
        let id = self.push(Node {
            value,
            requires_grad: true,
            grad: None,
            origin: Origin::Leaf,
            binding: Some(param.clone()),
        });
        self.bound_params.insert(param.id(), id);
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TapegradError> {
        self.nodes.get(id.0).ok_or(TapegradError::InvalidNode {
            node: id.0,
            len: self.nodes.len(),
        })
    }

    pub fn value(&self, id: NodeId) -> Result<&Tensor, TapegradError> {
        Ok(&self.node(id)?.value)
    }

    /// Gradient accumulated in a leaf node's slot, if any.
    pub fn grad(&self, id: NodeId) -> Result<Option<&Tensor>, TapegradError> {
        Ok(self.node(id)?.grad.as_ref())
    }

    pub fn requires_grad(&self, id: NodeId) -> Result<bool, TapegradError> {
        Ok(self.node(id)?.requires_grad)
    }

    /// Clears the gradient slots of every node in this graph.
    ///
    /// Parameter slots are owned by the parameters and cleared by the optimizer.
    pub fn zero_grad(&mut self) {
        for node in &mut self.nodes {
            node.grad = None;
        }
    }

    /// Records the result of an operation.
    ///
    /// The result tracks gradients only if recording is enabled and at least one
    /// input does; otherwise it becomes a detached leaf and `op` is never built.
    pub(crate) fn record(
        &mut self,
        value: Tensor,
        inputs: &[NodeId],
        op: impl FnOnce() -> Op,
    ) -> NodeId {
        let tracked = self.mode == GradMode::Enabled
            && inputs.iter().any(|id| self.nodes[id.0].requires_grad);
        let origin = if tracked {
            let op = op();
            log::trace!("recording {} as node {}", op.name(), self.nodes.len());
            Origin::Op(op)
        } else {
            Origin::Leaf
        };
        self.push(Node {
            value,
            requires_grad: tracked,
            grad: None,
            origin,
            binding: None,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

/// Depth-first postorder over the operation records reachable from `root`.
///
/// Every node appears after all of its tracked inputs, so walking the result
/// backwards visits each node before anything it depends on. Untracked inputs
/// are skipped. Meeting a released record fails with `GraphConsumed`.
pub(crate) fn topological_sort(nodes: &[Node], root: NodeId) -> Result<Vec<NodeId>, TapegradError> {
    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::new();
    let mut stack = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        if visited[id.0] {
            continue;
        }
        visited[id.0] = true;
        stack.push((id, true));

        match &nodes[id.0].origin {
            Origin::Leaf => {}
            Origin::Released => return Err(TapegradError::GraphConsumed { node: id.0 }),
            Origin::Op(op) => {
                for input in op.inputs() {
                    if !visited[input.0] && nodes[input.0].requires_grad {
                        stack.push((input, false));
                    }
                }
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
