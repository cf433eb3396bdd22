//! Synthetic, linearly separable classification data.

use super::vec_dataset::{LabeledDataset, VecDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tapegrad_core::{TapegradError, Tensor};

/// Parameters for [`gaussian_blobs`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlobsConfig {
    pub classes: usize,
    pub samples_per_class: usize,
    pub features: usize,
    /// Distance of each class centre from the origin.
    pub center_distance: f64,
    /// Standard deviation of every blob along every feature.
    pub spread: f64,
    pub seed: u64,
}

impl Default for BlobsConfig {
    fn default() -> Self {
        BlobsConfig {
            classes: 3,
            samples_per_class: 50,
            features: 2,
            center_distance: 4.0,
            spread: 0.5,
            seed: 0,
        }
    }
}

impl BlobsConfig {
    pub fn validate(&self) -> Result<(), TapegradError> {
        if self.classes < 2 {
            return Err(TapegradError::InvalidConfig(format!(
                "blobs need at least 2 classes, got {}",
                self.classes
            )));
        }
        if self.features == 0 {
            return Err(TapegradError::InvalidConfig(
                "blobs need at least 1 feature".to_string(),
            ));
        }
        if !(self.center_distance.is_finite() && self.center_distance > 0.0) {
            return Err(TapegradError::InvalidConfig(format!(
                "center_distance must be finite and positive, got {}",
                self.center_distance
            )));
        }
        if !(self.spread.is_finite() && self.spread > 0.0) {
            return Err(TapegradError::InvalidConfig(format!(
                "spread must be finite and positive, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    /// Centre of `class`.
    ///
    /// With two or more features the centres sit evenly on a circle of radius
    /// `center_distance` in the first two dimensions. With one feature they
    /// sit on a line, `center_distance` apart.
    pub fn center(&self, class: usize) -> Vec<f64> {
        let mut center = vec![0.0; self.features];
        if self.features == 1 {
            center[0] = self.center_distance * class as f64;
        } else {
            let angle = std::f64::consts::TAU * class as f64 / self.classes as f64;
            center[0] = self.center_distance * angle.cos();
            center[1] = self.center_distance * angle.sin();
        }
        center
    }
}

/// Draws `samples_per_class` points per class from isotropic normals around
/// well-spaced centres. Samples are grouped by class; shuffle with a sampler.
///
/// The same config always yields the same dataset.
pub fn gaussian_blobs(config: &BlobsConfig) -> Result<LabeledDataset, TapegradError> {
    config.validate()?;
    let noise = Normal::new(0.0, config.spread).map_err(|e| {
        TapegradError::InvalidConfig(format!("invalid blob spread {}: {}", config.spread, e))
    })?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut samples = Vec::with_capacity(config.classes * config.samples_per_class);
    for class in 0..config.classes {
        let center = config.center(class);
        for _ in 0..config.samples_per_class {
            let point: Vec<f64> = center.iter().map(|&c| c + rng.sample(noise)).collect();
            samples.push((Tensor::new(point, vec![config.features])?, class));
        }
    }
    log::debug!(
        "generated {} blob samples ({} classes, {} features)",
        samples.len(),
        config.classes,
        config.features
    );
    Ok(VecDataset::new(samples))
}

#[cfg(test)]
#[path = "blobs_test.rs"]
mod tests;
