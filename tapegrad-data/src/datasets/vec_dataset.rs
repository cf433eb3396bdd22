use super::traits::Dataset;
use tapegrad_core::{TapegradError, Tensor};

/// A simple dataset that wraps a `Vec` of items.
///
/// Each item in the `Vec` corresponds to a sample in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct VecDataset<T: Clone> {
    data: Vec<T>,
}

/// Input tensor plus class label per sample.
pub type LabeledDataset = VecDataset<(Tensor, usize)>;

impl<T: Clone> VecDataset<T> {
    /// Creates a new `VecDataset` from a vector of items.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Dataset for VecDataset<T> {
    type Item = T;

    /// Returns a clone of the item at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, TapegradError> {
        self.data
            .get(index)
            .cloned()
            .ok_or_else(|| TapegradError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.data.len()],
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
