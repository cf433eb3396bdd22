use crate::autograd::{check_grad, GradCheckOptions, Graph, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_sub_forward_and_backward() {
    let mut graph = Graph::new();
    let a = graph.leaf(Tensor::new(vec![5.0, 7.0], vec![2]).unwrap(), true);
    let b = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let c = graph.sub(a, b).unwrap();
    assert_eq!(graph.value(c).unwrap().data(), &[4.0, 5.0]);

    let loss = graph.sum(c).unwrap();
    graph.backward(loss).unwrap();
    assert_eq!(graph.grad(a).unwrap().unwrap().data(), &[1.0, 1.0]);
    assert_eq!(graph.grad(b).unwrap().unwrap().data(), &[-1.0, -1.0]);
}

#[test]
fn test_sub_only_tracked_side_receives_grad() {
    let mut graph = Graph::new();
    let a = graph.input(Tensor::new(vec![5.0, 7.0], vec![2]).unwrap());
    let b = graph.leaf(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap(), true);
    let c = graph.sub(a, b).unwrap();
    let loss = graph.sum(c).unwrap();
    graph.backward(loss).unwrap();
    assert!(graph.grad(a).unwrap().is_none());
    assert_eq!(graph.grad(b).unwrap().unwrap().data(), &[-1.0, -1.0]);
}

#[test]
fn test_sub_backward_grad_check() {
    let a = Tensor::new(vec![0.3, -0.7, 1.1], vec![3]).unwrap();
    let b = Tensor::new(vec![2.0, 0.4, -0.9], vec![3]).unwrap();
    let func = |g: &mut Graph, ids: &[NodeId]| {
        let d = g.sub(ids[0], ids[1])?;
        let sq = g.square(d)?;
        g.mean(sq)
    };
    check_grad(func, &[a, b], GradCheckOptions::default()).unwrap();
}
