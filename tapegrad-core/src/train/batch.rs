use crate::error::TapegradError;
use crate::tensor::Tensor;

/// One mini-batch: stacked inputs with a leading batch axis and one class
/// label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Tensor,
    pub labels: Vec<usize>,
}

impl Batch {
    /// # Errors
    /// `ShapeMismatch` if the leading axis of `inputs` differs from `labels.len()`.
    pub fn new(inputs: Tensor, labels: Vec<usize>) -> Result<Self, TapegradError> {
        let rows = inputs.shape().first().copied().unwrap_or(1);
        if rows != labels.len() {
            return Err(TapegradError::ShapeMismatch {
                expected: vec![rows],
                actual: vec![labels.len()],
                operation: "Batch::new (labels)".to_string(),
            });
        }
        Ok(Batch { inputs, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Anything that can hand out one epoch's worth of batches, repeatedly.
///
/// `batches` is called once per epoch and must start from the beginning each time.
pub trait BatchSource {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapegradError>> + '_>;
}

impl BatchSource for Vec<Batch> {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapegradError>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}
