//! Reverse-mode automatic differentiation.
//!
//! A [`Graph`] is an arena of [`Node`]s built eagerly during the forward pass.
//! Non-leaf nodes carry an operation record naming their inputs by [`NodeId`].
//! [`Graph::backward`] walks the records in reverse topological order and
//! accumulates gradients with the chain rule.

mod backward;
pub(crate) mod backward_op;
pub mod grad_check;
pub mod graph;

pub use grad_check::{check_grad, GradCheckError, GradCheckOptions};
pub use graph::{GradMode, Graph, Node, NodeId};
