use crate::autograd::{check_grad, GradCheckOptions, Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

#[test]
fn test_reshape_forward_and_backward() {
    let mut graph = Graph::new();
    let x = graph.leaf(Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap(), true);
    let y = graph.reshape(x, vec![3, 2]).unwrap();
    assert_eq!(graph.value(y).unwrap().shape(), &[3, 2]);
    let z = graph.sum(y).unwrap();
    graph.backward(z).unwrap();
    assert_eq!(graph.grad(x).unwrap().unwrap().shape(), &[2, 3]);
}

#[test]
fn test_reshape_wrong_element_count() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![4]).unwrap());
    assert!(matches!(
        graph.reshape(x, vec![3]),
        Err(TapegradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_flatten_keeps_batch_axis() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![0.0; 24], vec![2, 3, 4]).unwrap());
    let y = graph.flatten(x).unwrap();
    assert_eq!(graph.value(y).unwrap().shape(), &[2, 12]);

    let v = graph.input(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap());
    let w = graph.flatten(v).unwrap();
    assert_eq!(graph.value(w).unwrap().shape(), &[2, 1]);
}

#[test]
fn test_flatten_scalar_fails() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::scalar(3.0));
    assert!(matches!(
        graph.flatten(x),
        Err(TapegradError::RankMismatch { .. })
    ));
}

#[test]
fn test_reshape_grad_check() {
    let x = Tensor::new(vec![0.1, -0.4, 0.9, 1.3], vec![4]).unwrap();
    let w = Tensor::new(vec![1.0, -2.0, 0.5, 3.0], vec![2, 2]).unwrap();
    let func = |g: &mut Graph, ids: &[NodeId]| {
        let r = g.reshape(ids[0], vec![2, 2])?;
        let p = g.mul(r, ids[1])?;
        g.sum(p)
    };
    check_grad(func, &[x, w], GradCheckOptions::default()).unwrap();
}
