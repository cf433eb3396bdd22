use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Tensor {
    /// Applies `f` to every element, keeping the shape.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Combines two equally-shaped tensors element by element.
    ///
    /// # Errors
    /// Returns `TapegradError::IncompatibleShapes` when the shapes differ.
    pub fn zip_map<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Tensor,
        operation: &str,
        f: F,
    ) -> Result<Tensor, TapegradError> {
        self.check_same_shape(other, operation)?;
        Ok(Tensor {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        })
    }

    pub fn add(&self, other: &Tensor) -> Result<Tensor, TapegradError> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, TapegradError> {
        self.zip_map(other, "sub", |a, b| a - b)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, TapegradError> {
        self.zip_map(other, "mul", |a, b| a * b)
    }

    pub fn scale(&self, factor: f64) -> Tensor {
        self.map(|x| x * factor)
    }

    /// Adds `other` into `self` in place.
    pub fn add_assign(&mut self, other: &Tensor) -> Result<(), TapegradError> {
        self.check_same_shape(other, "add_assign")?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// In-place `self += alpha * other`.
    pub fn axpy(&mut self, alpha: f64, other: &Tensor) -> Result<(), TapegradError> {
        self.check_same_shape(other, "axpy")?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += alpha * b;
        }
        Ok(())
    }

    pub(crate) fn check_same_shape(
        &self,
        other: &Tensor,
        operation: &str,
    ) -> Result<(), TapegradError> {
        if self.shape != other.shape {
            return Err(TapegradError::IncompatibleShapes {
                shape1: self.shape.clone(),
                shape2: other.shape.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}
