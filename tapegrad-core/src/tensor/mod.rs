// src/tensor/mod.rs

use crate::error::TapegradError;
use std::fmt;

pub mod create;
mod elementwise;
mod linalg;
mod reduction;

pub use create::{full, ones, randn, uniform, zeros, zeros_like};

/// Represents a dense, row-major multi-dimensional array of `f64` values.
///
/// A `Tensor` is a plain value: it owns its buffer and carries no autograd
/// metadata. Gradient tracking lives in the [`Graph`](crate::autograd::Graph)
/// arena, which wraps tensors in nodes. Cloning copies the buffer.
///
/// A rank-0 tensor (empty shape) holds exactly one element.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    pub(crate) data: Vec<f64>,
    pub(crate) shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new Tensor with the given data and shape.
    ///
    /// # Errors
    /// Returns `TapegradError::TensorCreationError` if the length of `data`
    /// does not match the number of elements described by `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, TapegradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(TapegradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a rank-0 tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: vec![value],
            shape: vec![],
        }
    }

    /// Creates a tensor from any primitive numeric slice (e.g. raw `u8` pixels).
    ///
    /// Values that cannot be represented as `f64` become `NaN`.
    pub fn from_primitive<T>(data: &[T], shape: Vec<usize>) -> Result<Self, TapegradError>
    where
        T: num_traits::ToPrimitive,
    {
        let converted = data
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect();
        Tensor::new(converted, shape)
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat, row-major element buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the flat element buffer mutably. The shape cannot change through it.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Returns `true` if the tensor holds exactly one element.
    pub fn is_scalar(&self) -> bool {
        self.data.len() == 1
    }

    /// Returns the single value of a one-element tensor.
    ///
    /// # Errors
    /// Returns `TapegradError::ShapeMismatch` if the tensor holds more or fewer than one element.
    pub fn item(&self) -> Result<f64, TapegradError> {
        if self.data.len() != 1 {
            return Err(TapegradError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(self.data[0])
    }

    /// Returns the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Result<f64, TapegradError> {
        let out_of_bounds = || TapegradError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: self.shape.clone(),
        };
        if index.len() != self.shape.len() {
            return Err(out_of_bounds());
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return Err(out_of_bounds());
            }
            flat = flat * dim + i;
        }
        Ok(self.data[flat])
    }

    /// Returns a tensor with the same data viewed under a new shape.
    ///
    /// # Errors
    /// Returns `TapegradError::ShapeMismatch` if the element counts differ.
    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, TapegradError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(TapegradError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(Tensor {
            data: self.data.clone(),
            shape,
        })
    }

    /// Stacks equally-shaped tensors along a new leading axis.
    ///
    /// # Errors
    /// Returns `EmptyTensorList` for an empty slice and `ShapeMismatch` if shapes differ.
    pub fn stack(tensors: &[Tensor]) -> Result<Tensor, TapegradError> {
        let first = tensors.first().ok_or(TapegradError::EmptyTensorList)?;
        let mut data = Vec::with_capacity(first.numel() * tensors.len());
        for tensor in tensors {
            if tensor.shape != first.shape {
                return Err(TapegradError::ShapeMismatch {
                    expected: first.shape.clone(),
                    actual: tensor.shape.clone(),
                    operation: "stack".to_string(),
                });
            }
            data.extend_from_slice(&tensor.data);
        }
        let mut shape = Vec::with_capacity(first.rank() + 1);
        shape.push(tensors.len());
        shape.extend_from_slice(&first.shape);
        Ok(Tensor { data, shape })
    }

    /// Checks the tensor is rank 2 and returns `(rows, cols)`.
    pub(crate) fn dims2(&self, operation: &str) -> Result<(usize, usize), TapegradError> {
        match self.shape.as_slice() {
            [rows, cols] => Ok((*rows, *cols)),
            _ => Err(TapegradError::RankMismatch {
                expected: 2,
                actual: self.rank(),
                operation: operation.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        write!(f, "Tensor(shape={:?}, data=", self.shape)?;
        if self.data.len() <= PREVIEW {
            write!(f, "{:?})", self.data)
        } else {
            write!(f, "{:?}.. {} more)", &self.data[..PREVIEW], self.data.len() - PREVIEW)
        }
    }
}
