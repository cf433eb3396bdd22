use crate::error::TapegradError;

/// Which loss the trainer applies to the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossKind {
    /// The model emits raw scores; the loss is `cross_entropy`.
    #[default]
    CrossEntropy,
    /// The model already ends in log-softmax; the loss is `nll_loss`.
    Nll,
}

/// Hyperparameters for [`Trainer`](crate::train::Trainer).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub weight_decay: f64,
    /// `(step_size, gamma)`: multiply the learning rate by `gamma` every
    /// `step_size` epochs.
    pub lr_step: Option<(usize, f64)>,
    /// Log an epoch report at info level every `log_every` epochs. `0` keeps
    /// epoch reports at debug level.
    pub log_every: usize,
    pub loss: LossKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            learning_rate: 0.1,
            momentum: 0.0,
            weight_decay: 0.0,
            lr_step: None,
            log_every: 1,
            loss: LossKind::CrossEntropy,
        }
    }
}

impl TrainConfig {
    /// # Errors
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), TapegradError> {
        if self.epochs == 0 {
            return Err(TapegradError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TapegradError::InvalidConfig(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(TapegradError::InvalidConfig(format!(
                "momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }
        if !(self.weight_decay.is_finite() && self.weight_decay >= 0.0) {
            return Err(TapegradError::InvalidConfig(format!(
                "weight_decay must be finite and non-negative, got {}",
                self.weight_decay
            )));
        }
        if let Some((step_size, gamma)) = self.lr_step {
            if step_size == 0 || !(gamma > 0.0 && gamma <= 1.0) {
                return Err(TapegradError::InvalidConfig(format!(
                    "lr_step needs step_size >= 1 and gamma in (0, 1], got ({}, {})",
                    step_size, gamma
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            TrainConfig {
                epochs: 0,
                ..TrainConfig::default()
            },
            TrainConfig {
                learning_rate: -1.0,
                ..TrainConfig::default()
            },
            TrainConfig {
                momentum: 1.0,
                ..TrainConfig::default()
            },
            TrainConfig {
                weight_decay: f64::NAN,
                ..TrainConfig::default()
            },
            TrainConfig {
                lr_step: Some((0, 0.5)),
                ..TrainConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(TapegradError::InvalidConfig(_))
            ));
        }
    }
}
