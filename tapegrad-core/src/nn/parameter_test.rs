use super::*;
use crate::error::TapegradError;
use crate::tensor::{ones, zeros};

#[test]
fn test_parameter_starts_without_grad() {
    let param = Parameter::new(zeros(&[2, 2]));
    assert!(!param.has_grad());
    assert_eq!(param.shape(), vec![2, 2]);
}

#[test]
fn test_acc_grad_accumulates() {
    let param = Parameter::new(zeros(&[3]));
    param.acc_grad(&ones(&[3])).unwrap();
    param.acc_grad(&ones(&[3])).unwrap();
    assert_eq!(param.grad().unwrap().data(), &[2.0, 2.0, 2.0]);

    param.clear_grad();
    assert!(param.grad().is_none());
}

#[test]
fn test_acc_grad_rejects_wrong_shape() {
    let param = Parameter::new(zeros(&[2, 2]));
    let err = param.acc_grad(&ones(&[4])).unwrap_err();
    assert!(matches!(err, TapegradError::ShapeMismatch { .. }));
    assert!(!param.has_grad());
}

#[test]
fn test_parameter_clone_shares_storage() {
    let param = Parameter::new(zeros(&[2]));
    let alias = param.clone();
    alias.set_value(ones(&[2])).unwrap();
    assert_eq!(param.value().data(), &[1.0, 1.0]);
    assert!(param.ptr_eq(&alias));
    assert_eq!(param.id(), alias.id());

    let other = Parameter::new(zeros(&[2]));
    assert!(!param.ptr_eq(&other));
}

#[test]
fn test_update_with_skips_missing_grad() {
    let param = Parameter::new(ones(&[2]));
    assert!(param.update_with(|_, _| ()).is_none());

    param.acc_grad(&ones(&[2])).unwrap();
    param
        .update_with(|value, grad| value.axpy(-0.5, grad))
        .unwrap()
        .unwrap();
    assert_eq!(param.value().data(), &[0.5, 0.5]);
}
