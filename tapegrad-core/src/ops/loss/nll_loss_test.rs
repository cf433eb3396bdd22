use crate::autograd::{check_grad, GradCheckOptions, Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::Tensor;
use approx::assert_relative_eq;

fn log_probs() -> Tensor {
    Tensor::new(vec![-0.5, -1.0, -2.0, -3.0, -0.1, -0.7], vec![2, 3]).unwrap()
}

#[test]
fn test_nll_loss_forward() {
    let mut graph = Graph::new();
    let x = graph.input(log_probs());
    let loss = graph.nll_loss(x, &[0, 2]).unwrap();
    let value = graph.value(loss).unwrap();
    assert_eq!(value.shape(), &[] as &[usize]);
    assert_relative_eq!(value.item().unwrap(), 0.6, epsilon = 1e-12);
}

#[test]
fn test_nll_loss_backward() {
    let mut graph = Graph::new();
    let x = graph.leaf(log_probs(), true);
    let loss = graph.nll_loss(x, &[1, 0]).unwrap();
    graph.backward(loss).unwrap();
    assert_eq!(
        graph.grad(x).unwrap().unwrap().data(),
        &[0.0, -0.5, 0.0, -0.5, 0.0, 0.0]
    );
}

#[test]
fn test_nll_loss_label_out_of_range() {
    let mut graph = Graph::new();
    let x = graph.input(log_probs());
    match graph.nll_loss(x, &[0, 3]) {
        Err(TapegradError::InvalidLabel {
            label,
            index,
            num_classes,
        }) => {
            assert_eq!((label, index, num_classes), (3, 1, 3));
        }
        other => panic!("expected InvalidLabel, got {:?}", other),
    }
}

#[test]
fn test_nll_loss_label_count_mismatch() {
    let mut graph = Graph::new();
    let x = graph.input(log_probs());
    assert!(matches!(
        graph.nll_loss(x, &[0]),
        Err(TapegradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_nll_loss_empty_batch() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![], vec![0, 3]).unwrap());
    assert!(matches!(
        graph.nll_loss(x, &[]),
        Err(TapegradError::EmptyBatch { .. })
    ));
}

#[test]
fn test_nll_loss_requires_rank_two() {
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![-0.1, -2.0], vec![2]).unwrap());
    assert!(matches!(
        graph.nll_loss(x, &[0, 1]),
        Err(TapegradError::RankMismatch { .. })
    ));
}

#[test]
fn test_cross_entropy_uniform_logits() {
    let mut graph = Graph::new();
    let logits = graph.input(Tensor::new(vec![0.0; 8], vec![2, 4]).unwrap());
    let loss = graph.cross_entropy(logits, &[3, 1]).unwrap();
    assert_relative_eq!(
        graph.value(loss).unwrap().item().unwrap(),
        4.0f64.ln(),
        epsilon = 1e-12
    );
}

#[test]
fn test_cross_entropy_gradient_is_softmax_minus_one_hot() {
    let mut graph = Graph::new();
    let logits = graph.leaf(Tensor::new(vec![0.0, 0.0], vec![1, 2]).unwrap(), true);
    let loss = graph.cross_entropy(logits, &[1]).unwrap();
    graph.backward(loss).unwrap();
    let grad = graph.grad(logits).unwrap().unwrap();
    assert_relative_eq!(grad.data()[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(grad.data()[1], -0.5, epsilon = 1e-12);
}

#[test]
fn test_cross_entropy_grad_check() {
    let logits = Tensor::new(vec![0.3, -1.2, 2.0, 0.1, 0.4, -0.6], vec![3, 2]).unwrap();
    let func = |g: &mut Graph, ids: &[NodeId]| g.cross_entropy(ids[0], &[1, 0, 1]);
    check_grad(func, &[logits], GradCheckOptions::default()).unwrap();
}
