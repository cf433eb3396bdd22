use crate::error::TapegradError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use crate::tensor::Tensor;

/// Hyperparameters for [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdOptions {
    pub lr: f64,
    /// Momentum factor. `0.0` disables the momentum buffer.
    pub momentum: f64,
    /// L2 penalty added to the gradient as `weight_decay · value`.
    pub weight_decay: f64,
}

impl Default for SgdOptions {
    fn default() -> Self {
        SgdOptions {
            lr: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
        }
    }
}

impl SgdOptions {
    fn validate(&self) -> Result<(), TapegradError> {
        if !(self.lr.is_finite() && self.lr > 0.0) {
            return Err(TapegradError::InvalidHyperparameter {
                name: "lr".to_string(),
                value: self.lr,
            });
        }
        if !(self.momentum.is_finite() && (0.0..1.0).contains(&self.momentum)) {
            return Err(TapegradError::InvalidHyperparameter {
                name: "momentum".to_string(),
                value: self.momentum,
            });
        }
        if !(self.weight_decay.is_finite() && self.weight_decay >= 0.0) {
            return Err(TapegradError::InvalidHyperparameter {
                name: "weight_decay".to_string(),
                value: self.weight_decay,
            });
        }
        Ok(())
    }
}

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// Plain update: `value ← value − lr·(grad + weight_decay·value)`.
/// With momentum the step direction is the running buffer
/// `buf ← momentum·buf + d` instead.
#[derive(Debug)]
pub struct Sgd {
    params: Vec<Parameter>,
    options: SgdOptions,
    // Aligned with `params`; created on a parameter's first update.
    momentum_buffers: Vec<Option<Tensor>>,
}

impl Sgd {
    /// Creates a plain SGD optimizer over `params`.
    ///
    /// # Errors
    /// `InvalidHyperparameter` unless `lr` is finite and positive.
    pub fn new(
        params: impl IntoIterator<Item = Parameter>,
        lr: f64,
    ) -> Result<Self, TapegradError> {
        Self::with_options(
            params,
            SgdOptions {
                lr,
                ..SgdOptions::default()
            },
        )
    }

    /// Creates an SGD optimizer with explicit hyperparameters.
    ///
    /// A parameter handed in more than once (a tied weight) is kept only at
    /// its first position, so it is updated once per step.
    pub fn with_options(
        params: impl IntoIterator<Item = Parameter>,
        options: SgdOptions,
    ) -> Result<Self, TapegradError> {
        options.validate()?;
        let mut unique: Vec<Parameter> = Vec::new();
        for param in params {
            if unique.iter().any(|seen| seen.ptr_eq(&param)) {
                log::debug!("Sgd: skipping duplicate parameter handle");
                continue;
            }
            unique.push(param);
        }
        let params = unique;
        let momentum_buffers = vec![None; params.len()];
        Ok(Sgd {
            params,
            options,
            momentum_buffers,
        })
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn options(&self) -> &SgdOptions {
        &self.options
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), TapegradError> {
        let SgdOptions {
            lr,
            momentum,
            weight_decay,
        } = self.options;
        let mut updated = 0;

        for (param, buffer) in self.params.iter().zip(self.momentum_buffers.iter_mut()) {
            let outcome = param.update_with(|value, grad| -> Result<(), TapegradError> {
                let mut d_p = grad.clone();
                if weight_decay != 0.0 {
                    d_p.axpy(weight_decay, value)?;
                }
                if momentum != 0.0 {
                    d_p = match buffer.take() {
                        Some(mut buf) => {
                            for (b, &d) in buf.data_mut().iter_mut().zip(d_p.data()) {
                                *b = momentum * *b + d;
                            }
                            buf
                        }
                        None => d_p,
                    };
                    *buffer = Some(d_p.clone());
                }
                value.axpy(-lr, &d_p)
            });
            if let Some(result) = outcome {
                result?;
                updated += 1;
            }
        }

        if updated == 0 {
            return Err(TapegradError::NoGradients);
        }
        log::trace!(
            "sgd step updated {} of {} parameters (lr={})",
            updated,
            self.params.len(),
            lr
        );
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.clear_grad();
        }
    }

    fn learning_rate(&self) -> f64 {
        self.options.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.options.lr = lr;
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
