use super::*;

#[test]
fn lookup_by_name() {
    assert_eq!(Function::from_name("min"), Ok(Function::Min));
    assert_eq!(Function::from_name("max"), Ok(Function::Max));
    assert_eq!(Function::from_name("round"), Ok(Function::Round));
    assert_eq!(
        Function::from_name("sqrt"),
        Err(ExprError::UnknownFunction { name: "sqrt".to_string() })
    );
}

#[test]
fn arity() {
    assert!(Function::Min.check_arity(2).is_ok());
    assert!(Function::Min.check_arity(1).is_err());
    assert!(Function::Max.check_arity(3).is_err());
    assert!(Function::Round.check_arity(1).is_ok());
    assert!(Function::Round.check_arity(2).is_ok());
    assert!(Function::Round.check_arity(0).is_err());
    assert!(Function::Round.check_arity(3).is_err());
}

#[test]
fn min_max() {
    assert_eq!(Function::Min.apply(&[Some(5.0), Some(2.0)]), Some(2.0));
    assert_eq!(Function::Max.apply(&[Some(5.0), Some(2.0)]), Some(5.0));
    assert_eq!(Function::Max.apply(&[Some(5.0), None]), None);
}

#[test]
fn nan_arguments_are_missing() {
    assert_eq!(Function::Min.apply(&[Some(f64::NAN), Some(5.0)]), None);
    assert_eq!(Function::Min.apply(&[Some(5.0), Some(f64::NAN)]), None);
    assert_eq!(Function::Max.apply(&[Some(f64::NAN), Some(5.0)]), None);
    assert_eq!(Function::Round.apply(&[Some(f64::NAN)]), None);
    assert_eq!(Function::Round.apply(&[Some(1.5), Some(f64::NAN)]), None);
}

#[test]
fn round() {
    assert_eq!(Function::Round.apply(&[Some(3.14159), Some(2.0)]), Some(3.14));
    assert_eq!(Function::Round.apply(&[Some(2.5)]), Some(3.0));
    assert_eq!(Function::Round.apply(&[Some(-2.5)]), Some(-2.0));
    assert_eq!(Function::Round.apply(&[Some(-2.6)]), Some(-3.0));
    assert_eq!(Function::Round.apply(&[None, Some(2.0)]), None);
    assert_eq!(Function::Round.apply(&[Some(1.5), None]), None);
}
