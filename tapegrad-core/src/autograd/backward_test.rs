use crate::autograd::Graph;
use crate::error::TapegradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;
use approx::assert_relative_eq;

#[test]
fn test_backward_rejects_non_scalar_output() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let y = graph.scale(x, 2.0).unwrap();
    match graph.backward(y) {
        Err(TapegradError::BackwardNonScalar { shape }) => assert_eq!(shape, vec![2]),
        other => panic!("expected BackwardNonScalar, got {:?}", other),
    }
}

#[test]
fn test_backward_accepts_one_element_tensor() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![3.0], vec![1, 1]).unwrap(), true);
    let y = graph.square(x).unwrap();
    graph.backward(y).unwrap();
    assert_relative_eq!(graph.grad(x).unwrap().unwrap().data()[0], 6.0);
}

#[test]
fn test_backward_twice_fails_with_graph_consumed() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let y = graph.square(x).unwrap();
    let s = graph.sum(y).unwrap();
    graph.backward(s).unwrap();
    assert!(graph.node(s).unwrap().op_name().is_none());
    assert!(matches!(
        graph.backward(s),
        Err(TapegradError::GraphConsumed { .. })
    ));
    // The first pass's gradient survives the failed second call.
    assert_eq!(graph.grad(x).unwrap().unwrap().data(), &[2.0, 4.0]);
}

#[test]
fn test_backward_through_released_intermediate_fails() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let y = graph.square(x).unwrap();
    let s = graph.sum(y).unwrap();
    graph.backward(s).unwrap();
    let m = graph.mean(y).unwrap();
    assert!(matches!(
        graph.backward(m),
        Err(TapegradError::GraphConsumed { .. })
    ));
}

#[test]
fn test_backward_retained_accumulates() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let y = graph.square(x).unwrap();
    let s = graph.sum(y).unwrap();
    graph.backward_retained(s).unwrap();
    graph.backward_retained(s).unwrap();
    assert_eq!(graph.grad(x).unwrap().unwrap().data(), &[4.0, 8.0]);
}

#[test]
fn test_backward_on_untracked_output_is_noop() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap());
    let s = graph.sum(x).unwrap();
    graph.backward(s).unwrap();
    assert!(graph.grad(x).unwrap().is_none());
}

#[test]
fn test_two_paths_accumulate_before_propagating() {
    // z = x·y + x, so dz/dx = y + 1 and dz/dy = x.
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::scalar(3.0), true);
    let y = graph.leaf(Tensor::scalar(-2.0), true);
    let xy = graph.mul(x, y).unwrap();
    let z = graph.add(xy, x).unwrap();
    graph.backward(z).unwrap();
    assert_relative_eq!(graph.grad(x).unwrap().unwrap().item().unwrap(), -1.0);
    assert_relative_eq!(graph.grad(y).unwrap().unwrap().item().unwrap(), 3.0);
}

#[test]
fn test_diamond_graph() {
    // a feeds both b = 2a and c = a², then d = b + c. dd/da = 2 + 2a.
    let mut graph = Graph::new();
    let a = graph.leaf(Tensor::new(vec![1.0, -3.0], vec![2]).unwrap(), true);
    let b = graph.scale(a, 2.0).unwrap();
    let c = graph.square(a).unwrap();
    let d = graph.add(b, c).unwrap();
    let s = graph.sum(d).unwrap();
    graph.backward(s).unwrap();
    assert_eq!(graph.grad(a).unwrap().unwrap().data(), &[4.0, -4.0]);
}

#[test]
fn test_untracked_leaf_gets_no_gradient() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let c = graph.input(Tensor::new(vec![5.0, 7.0], vec![2]).unwrap());
    let p = graph.mul(x, c).unwrap();
    let s = graph.sum(p).unwrap();
    graph.backward(s).unwrap();
    assert_eq!(graph.grad(x).unwrap().unwrap().data(), &[5.0, 7.0]);
    assert!(graph.grad(c).unwrap().is_none());
}

#[test]
fn test_parameter_slot_accumulates_across_graphs() {
    let param = Parameter::new(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap());
    for _ in 0..2 {
        let mut graph = Graph::new();
        let w = graph.param(&param);
        let s = graph.sum(w).unwrap();
        graph.backward(s).unwrap();
    }
    assert_eq!(param.grad().unwrap().data(), &[2.0, 2.0]);
    param.clear_grad();
    assert!(param.grad().is_none());
}
