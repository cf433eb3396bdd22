// tapegrad-data/src/datasets/traits.rs

use tapegrad_core::TapegradError;

/// Trait representing a dataset.
///
/// A dataset provides access to individual samples (e.g. an input tensor and
/// its class label) by index.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the sample at `index`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item, TapegradError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
