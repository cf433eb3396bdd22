use crate::error::TapegradError;
use crate::tensor::Tensor;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
struct ParameterData {
    value: Tensor,
    grad: Option<Tensor>,
}

/// A learnable tensor owned by a module across many forward/backward cycles.
///
/// `Parameter` is a shared handle: clones point at the same value and gradient
/// slot, so the module, the optimizer and each per-pass [`Graph`](crate::autograd::Graph)
/// can all hold it. Gradients are accumulated into the slot after every
/// backward pass and stay there until [`clear_grad`](Parameter::clear_grad).
#[derive(Clone)]
pub struct Parameter(Rc<RefCell<ParameterData>>);

impl Parameter {
    /// Wraps a tensor as a parameter with an empty gradient slot.
    pub fn new(value: Tensor) -> Self {
        Parameter(Rc::new(RefCell::new(ParameterData { value, grad: None })))
    }

    /// Borrows the current value.
    pub fn value(&self) -> Ref<'_, Tensor> {
        Ref::map(self.0.borrow(), |data| &data.value)
    }

    pub fn shape(&self) -> Vec<usize> {
        self.0.borrow().value.shape().to_vec()
    }

    /// Returns a clone of the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.0.borrow().grad.clone()
    }

    pub fn has_grad(&self) -> bool {
        self.0.borrow().grad.is_some()
    }

    /// Accumulates `grad` into the gradient slot (creating it on first write).
    pub fn acc_grad(&self, grad: &Tensor) -> Result<(), TapegradError> {
        let mut data = self.0.borrow_mut();
        if grad.shape() != data.value.shape() {
            return Err(TapegradError::ShapeMismatch {
                expected: data.value.shape().to_vec(),
                actual: grad.shape().to_vec(),
                operation: "acc_grad".to_string(),
            });
        }
        match data.grad.as_mut() {
            Some(existing) => existing.add_assign(grad)?,
            None => data.grad = Some(grad.clone()),
        }
        Ok(())
    }

    /// Clears the gradient slot back to absent.
    pub fn clear_grad(&self) {
        self.0.borrow_mut().grad = None;
    }

    /// Replaces the value. The gradient slot is left untouched.
    pub fn set_value(&self, value: Tensor) -> Result<(), TapegradError> {
        let mut data = self.0.borrow_mut();
        if value.shape() != data.value.shape() {
            return Err(TapegradError::ShapeMismatch {
                expected: data.value.shape().to_vec(),
                actual: value.shape().to_vec(),
                operation: "set_value".to_string(),
            });
        }
        data.value = value;
        Ok(())
    }

    /// Runs `f` with mutable access to the value and shared access to the gradient.
    ///
    /// Returns `None` without calling `f` if there is no gradient.
    pub(crate) fn update_with<R>(&self, f: impl FnOnce(&mut Tensor, &Tensor) -> R) -> Option<R> {
        let mut data = self.0.borrow_mut();
        let ParameterData { value, grad } = &mut *data;
        grad.as_ref().map(|g| f(value, g))
    }

    /// Stable identity of the shared slot, used to deduplicate graph leaves.
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Parameter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        write!(
            f,
            "Parameter({:?}, grad={})",
            data.value,
            if data.grad.is_some() { "set" } else { "none" }
        )
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
