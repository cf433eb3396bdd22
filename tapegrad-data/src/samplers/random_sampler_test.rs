// tapegrad-data/src/samplers/random_sampler_test.rs

use super::*;
use std::collections::HashSet;

#[test]
fn test_random_sampler_len_default() {
    let sampler = RandomSampler::new(false, None);
    assert_eq!(sampler.len(10), 10);
}

#[test]
fn test_random_sampler_len_with_num_samples() {
    let sampler = RandomSampler::new(false, Some(5));
    assert_eq!(sampler.len(10), 5);
    assert_eq!(RandomSampler::new(false, Some(50)).len(10), 10);
    assert_eq!(RandomSampler::new(true, Some(50)).len(10), 50);
}

#[test]
fn test_random_sampler_iter_no_replacement_less_than_dataset() {
    let dataset_len = 10;
    let num_samples = 5;
    let sampler = RandomSampler::new(false, Some(num_samples));
    let indices: Vec<usize> = sampler.iter(dataset_len).collect();
    assert_eq!(indices.len(), num_samples);
    let unique_indices: HashSet<usize> = indices.into_iter().collect();
    assert_eq!(unique_indices.len(), num_samples);
    assert!(unique_indices.iter().all(|&i| i < dataset_len));
}

#[test]
fn test_random_sampler_iter_is_a_permutation() {
    let sampler = RandomSampler::new(false, None);
    let mut indices: Vec<usize> = sampler.iter(10).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_random_sampler_oversampling_without_replacement_is_clamped() {
    let sampler = RandomSampler::new(false, Some(10));
    let indices: Vec<usize> = sampler.iter(5).collect();
    assert_eq!(indices.len(), 5);
}

#[test]
fn test_random_sampler_with_replacement_in_range() {
    let sampler = RandomSampler::new(true, Some(30)).with_seed(9);
    let indices: Vec<usize> = sampler.iter(4).collect();
    assert_eq!(indices.len(), 30);
    assert!(indices.iter().all(|&i| i < 4));
}

#[test]
fn test_seeded_sampler_reproducible_across_runs() {
    let a = RandomSampler::seeded(123);
    let b = RandomSampler::seeded(123);
    for _ in 0..3 {
        let ia: Vec<usize> = a.iter(50).collect();
        let ib: Vec<usize> = b.iter(50).collect();
        assert_eq!(ia, ib);
    }
}

#[test]
fn test_seeded_sampler_changes_order_each_epoch() {
    let sampler = RandomSampler::seeded(7);
    let first: Vec<usize> = sampler.iter(50).collect();
    let second: Vec<usize> = sampler.iter(50).collect();
    assert_ne!(first, second);
}

#[test]
fn test_random_sampler_empty_dataset() {
    let sampler = RandomSampler::seeded(1);
    assert_eq!(sampler.iter(0).count(), 0);
}
