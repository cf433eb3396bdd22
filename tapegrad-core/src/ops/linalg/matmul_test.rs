use crate::autograd::{check_grad, GradCheckOptions, Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;

#[test]
fn test_matmul_forward() {
    let mut graph = Graph::new();
    let a = graph.input(Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap());
    let b = graph.input(Tensor::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]).unwrap());
    let c = graph.matmul(a, b).unwrap();
    assert_eq!(graph.value(c).unwrap().shape(), &[2, 2]);
    assert_eq!(graph.value(c).unwrap().data(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_matmul_inner_mismatch_is_shape_error() {
    let mut graph = Graph::new();
    let a = graph.leaf(Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap(), true);
    let b = graph.leaf(Tensor::new(vec![1.0; 8], vec![4, 2]).unwrap(), true);
    let err = graph.matmul(a, b).unwrap_err();
    assert_eq!(
        err,
        TapegradError::IncompatibleShapes {
            shape1: vec![2, 3],
            shape2: vec![4, 2],
            operation: "matmul".to_string(),
        }
    );
}

#[test]
fn test_matmul_backward_simple() {
    // loss = sum(A·B) => dA = ones·Bᵗ, dB = Aᵗ·ones
    let mut graph = Graph::new();
    let a = graph.leaf(Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap(), true);
    let b = graph.leaf(Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap(), true);
    let c = graph.matmul(a, b).unwrap();
    let loss = graph.sum(c).unwrap();
    graph.backward(loss).unwrap();
    assert_eq!(graph.grad(a).unwrap().unwrap().data(), &[11.0, 15.0, 11.0, 15.0]);
    assert_eq!(graph.grad(b).unwrap().unwrap().data(), &[4.0, 4.0, 6.0, 6.0]);
}

#[test]
fn test_matmul_backward_grad_check() {
    let a = Tensor::new(vec![0.1, -0.4, 0.7, 1.2, -0.5, 0.3], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![0.9, -1.1, 0.2, 0.6, -0.3, 0.8], vec![3, 2]).unwrap();
    let func = |g: &mut Graph, ids: &[NodeId]| {
        let c = g.matmul(ids[0], ids[1])?;
        let sq = g.square(c)?;
        g.sum(sq)
    };
    check_grad(func, &[a, b], GradCheckOptions::default()).unwrap();
}
