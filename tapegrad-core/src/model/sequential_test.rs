use super::*;
use crate::nn::{Linear, ReLU, Sigmoid};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mlp() -> Sequential {
    let mut rng = StdRng::seed_from_u64(11);
    Sequential::new()
        .with(Linear::new(3, 4, true, &mut rng).unwrap())
        .with(ReLU)
        .with(Linear::new(4, 2, true, &mut rng).unwrap())
        .with(Sigmoid)
}

#[test]
fn test_sequential_parameter_names_are_prefixed_by_position() {
    let model = mlp();
    assert_eq!(model.len(), 4);
    let names: Vec<String> = model
        .named_parameters()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["0.weight", "0.bias", "2.weight", "2.bias"]);
}

#[test]
fn test_sequential_forward_shape() {
    let model = mlp();
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![0.1; 15], vec![5, 3]).unwrap());
    let y = model.forward(&mut graph, x).unwrap();
    assert_eq!(graph.value(y).unwrap().shape(), &[5, 2]);
    assert!(graph.requires_grad(y).unwrap());
}

#[test]
fn test_empty_sequential_is_identity() {
    let model = Sequential::new();
    assert!(model.is_empty());
    let mut graph = Graph::new();
    let x = graph.input(Tensor::scalar(2.0));
    assert_eq!(model.forward(&mut graph, x).unwrap(), x);
}

#[test]
fn test_sequential_backward_reaches_every_parameter() {
    let model = mlp();
    let mut graph = Graph::new();
    let x = graph.input(Tensor::new(vec![0.5, -0.2, 0.9, 1.0, 0.3, -0.7], vec![2, 3]).unwrap());
    let y = model.forward(&mut graph, x).unwrap();
    let s = graph.sum(y).unwrap();
    graph.backward(s).unwrap();
    assert!(model.parameters().iter().all(|p| p.has_grad()));
    assert!(model.get(1).unwrap().named_parameters().is_empty());
}

#[test]
fn test_sequential_lists_shared_parameters_once() {
    let mut rng = StdRng::seed_from_u64(3);
    let shared = Linear::new(2, 2, true, &mut rng).unwrap();
    let model = Sequential::new()
        .with(shared.clone())
        .with(Sigmoid)
        .with(shared.clone());
    let names: Vec<String> = model
        .named_parameters()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["0.weight", "0.bias"]);
    assert!(model.parameters()[0].ptr_eq(shared.weight()));
}
