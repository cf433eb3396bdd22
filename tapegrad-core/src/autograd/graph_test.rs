use super::{topological_sort, GradMode, Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

fn vec2(a: f64, b: f64) -> Tensor {
    Tensor::new(vec![a, b], vec![2]).unwrap()
}

#[test]
fn test_node_ids_follow_creation_order() {
    let mut graph = Graph::new();
    let a = graph.input(vec2(1.0, 2.0));
    let b = graph.leaf(vec2(3.0, 4.0), true);
    let c = graph.add(a, b).unwrap();
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
    assert_eq!(graph.len(), 3);
}

#[test]
fn test_result_tracks_when_any_input_tracks() {
    let mut graph = Graph::new();
    let a = graph.input(vec2(1.0, 2.0));
    let b = graph.leaf(vec2(3.0, 4.0), true);
    let c = graph.mul(a, b).unwrap();
    assert!(graph.requires_grad(c).unwrap());
    let node = graph.node(c).unwrap();
    assert!(!node.is_leaf());
    assert_eq!(node.op_name(), Some("mul"));
}

#[test]
fn test_disabled_mode_records_nothing() {
    let mut graph = Graph::with_mode(GradMode::Disabled);
    let a = graph.leaf(vec2(1.0, 2.0), true);
    let b = graph.add(a, a).unwrap();
    assert!(!graph.requires_grad(b).unwrap());
    assert!(graph.node(b).unwrap().is_leaf());
    assert_eq!(graph.value(b).unwrap().data(), &[2.0, 4.0]);
}

#[test]
fn test_no_grad_scope_restores_mode() {
    let mut graph = Graph::new();
    let a = graph.leaf(vec2(1.0, 2.0), true);
    let inside = graph.no_grad(|g| {
        assert_eq!(g.mode(), GradMode::Disabled);
        g.add(a, a)
    });
    let inside = inside.unwrap();
    assert!(!graph.requires_grad(inside).unwrap());
    assert_eq!(graph.mode(), GradMode::Enabled);

    let outside = graph.add(a, a).unwrap();
    assert!(graph.requires_grad(outside).unwrap());
}

#[test]
fn test_invalid_node_id() {
    let graph = Graph::new();
    match graph.value(NodeId(5)) {
        Err(TapegradError::InvalidNode { node, len }) => assert_eq!((node, len), (5, 0)),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_param_is_bound_once_per_graph() {
    let param = Parameter::new(vec2(0.5, -0.5));
    let mut graph = Graph::new();
    let first = graph.param(&param);
    let second = graph.param(&param.clone());
    assert_eq!(first, second);
    assert!(graph.requires_grad(first).unwrap());

    let other = Parameter::new(vec2(0.5, -0.5));
    assert_ne!(graph.param(&other), first);
}

#[test]
fn test_topological_sort_puts_inputs_first() {
    let mut graph = Graph::new();
    let x = graph.leaf(vec2(1.0, 2.0), true);
    let c = graph.input(vec2(3.0, 3.0));
    let y = graph.mul(x, c).unwrap();
    let z = graph.add(y, x).unwrap();
    let s = graph.sum(z).unwrap();

    let order = topological_sort(&graph.nodes, s).unwrap();
    let position = |id: NodeId| order.iter().position(|&o| o == id);
    // The untracked constant is never visited.
    assert_eq!(position(c), None);
    assert_eq!(order.len(), 4);
    assert!(position(x) < position(y));
    assert!(position(y) < position(z));
    assert_eq!(position(s), Some(3));
}

#[test]
fn test_graph_zero_grad_clears_leaf_slots() {
    let mut graph = Graph::new();
    let x = graph.leaf(vec2(1.0, 2.0), true);
    let s = graph.sum(x).unwrap();
    graph.backward(s).unwrap();
    assert!(graph.grad(x).unwrap().is_some());
    graph.zero_grad();
    assert!(graph.grad(x).unwrap().is_none());
}
