use crate::error::TapegradError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Every managed parameter that holds a gradient is updated in place.
    /// Parameters without a gradient are left untouched.
    ///
    /// # Errors
    /// `NoGradients` if none of the managed parameters holds a gradient.
    fn step(&mut self) -> Result<(), TapegradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Call this between batches; otherwise the next backward pass adds onto
    /// the previous gradients.
    fn zero_grad(&mut self);

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64);
}
