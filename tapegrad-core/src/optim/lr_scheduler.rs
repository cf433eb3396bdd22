use crate::error::TapegradError;
use crate::optim::optimizer_trait::Optimizer;

/// Adjusts an optimizer's learning rate as training progresses.
pub trait LrScheduler {
    /// Advances the schedule by one epoch and writes the new rate into `optimizer`.
    fn step(&mut self, optimizer: &mut dyn Optimizer);

    /// Learning rate set by the most recent call to `step`, or the starting
    /// rate before the first call.
    fn last_lr(&self) -> f64;
}

/// Decays the learning rate by `gamma` every `step_size` epochs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLr {
    step_size: usize,
    gamma: f64,
    base_lr: f64,
    last_epoch: usize,
    last_lr: f64,
}

impl StepLr {
    /// # Errors
    /// `InvalidHyperparameter` if `step_size` is zero or `gamma` is not in `(0, 1]`.
    pub fn new(base_lr: f64, step_size: usize, gamma: f64) -> Result<Self, TapegradError> {
        if step_size == 0 {
            return Err(TapegradError::InvalidHyperparameter {
                name: "step_size".to_string(),
                value: 0.0,
            });
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(TapegradError::InvalidHyperparameter {
                name: "gamma".to_string(),
                value: gamma,
            });
        }
        Ok(StepLr {
            step_size,
            gamma,
            base_lr,
            last_epoch: 0,
            last_lr: base_lr,
        })
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl LrScheduler for StepLr {
    fn step(&mut self, optimizer: &mut dyn Optimizer) {
        self.last_epoch += 1;
        let decays = i32::try_from(self.last_epoch / self.step_size).unwrap_or(i32::MAX);
        let lr = self.base_lr * self.gamma.powi(decays);
        // The optimizer requires a positive rate; decay never reaches zero.
        self.last_lr = if lr > 0.0 {
            lr
        } else {
            log::warn!(
                "StepLr: learning rate underflowed at epoch {}; clamping to {:e}",
                self.last_epoch,
                f64::MIN_POSITIVE
            );
            f64::MIN_POSITIVE
        };
        optimizer.set_learning_rate(self.last_lr);
        log::debug!(
            "StepLr: epoch {} -> lr {}",
            self.last_epoch,
            self.last_lr
        );
    }

    fn last_lr(&self) -> f64 {
        self.last_lr
    }
}

#[cfg(test)]
#[path = "lr_scheduler_test.rs"]
mod tests;
