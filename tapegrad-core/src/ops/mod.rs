//! Differentiable operations recorded on a [`Graph`](crate::autograd::Graph).
//!
//! Every operation is a `Graph` method: it checks shapes, computes the forward
//! value eagerly and records an operation record when an input tracks
//! gradients. The matching `*_backward` function holds the local-gradient rule.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
pub mod view;
