// src/tensor/create.rs

use crate::error::TapegradError;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Tensor {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Tensor {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f64) -> Tensor {
    let numel = shape.iter().product();
    Tensor {
        data: vec![value; numel],
        shape: shape.to_vec(),
    }
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(tensor.shape())
}

/// Samples a tensor from the standard normal distribution N(0, 1).
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Tensor {
    let numel = shape.iter().product();
    let data = (0..numel).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
    Tensor {
        data,
        shape: shape.to_vec(),
    }
}

/// Samples a tensor uniformly from `[low, high)`.
///
/// # Errors
/// Returns `TapegradError::InvalidHyperparameter` unless `low < high` and both are finite.
pub fn uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Tensor, TapegradError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(TapegradError::InvalidHyperparameter {
            name: "uniform bounds".to_string(),
            value: high - low,
        });
    }
    let numel = shape.iter().product();
    let dist = Uniform::new(low, high);
    let data = (0..numel).map(|_| dist.sample(rng)).collect();
    Ok(Tensor {
        data,
        shape: shape.to_vec(),
    })
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
