use crate::error::TapegradError;
use crate::tensor::{uniform, zeros, Tensor};
use rand::Rng;

/// Bound `1/√fan_in` of the default uniform initialisation for linear layers.
pub fn linear_bound(fan_in: usize) -> f64 {
    1.0 / (fan_in as f64).sqrt()
}

/// Draws a tensor of `shape` from `U(-1/√fan_in, 1/√fan_in)`.
///
/// A zero `fan_in` gives an all-zero tensor.
pub fn linear_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    rng: &mut R,
) -> Result<Tensor, TapegradError> {
    if fan_in == 0 {
        return Ok(zeros(shape));
    }
    let bound = linear_bound(fan_in);
    uniform(shape, -bound, bound, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
