use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
    util::num::parse_radix_literal,
};

/// Message used by `ASSERT` when none is given.
pub const DEFAULT_ASSERT_MESSAGE: &str = "Assert error";

/// Asserts that a boolean argument is true.
///
/// Accepts one or two arguments. If the condition is false, a
/// `UserAssertion` error is returned carrying the second argument, which
/// must be a string, or [`DEFAULT_ASSERT_MESSAGE`].
///
/// # Returns
/// `TRUE` on success.
///
/// # Example
/// ```
/// use abacus::interpreter::{evaluator::function::meta::assert_fn, value::core::Value};
///
/// let r = assert_fn(&[Value::Boolean(true)]).unwrap();
/// assert_eq!(r, Value::Boolean(true));
///
/// let e = assert_fn(&[Value::Boolean(false), Value::from("boom")]).unwrap_err();
/// assert_eq!(e.to_string(), "boom");
/// ```
///
/// # Errors
/// `UserAssertion` when the condition is false, `TypeMismatch` when the
/// condition is not a boolean or the message not a string.
pub fn assert_fn(args: &[Value]) -> EvalResult<Value> {
    if args[0].as_bool()? {
        return Ok(Value::Boolean(true));
    }

    let message = match args.get(1) {
        Some(message) => message.as_str()?.to_string(),
        None => DEFAULT_ASSERT_MESSAGE.to_string(),
    };
    Err(RuntimeError::UserAssertion { message })
}

/// The type tag of a value, as a string.
///
/// # Errors
/// Never fails.
pub fn type_of(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::from(args[0].tag()))
}

/// Converts a value to a number.
///
/// Numbers pass through and booleans become `1` or `0`. Strings are trimmed
/// and parsed as decimal, `0b`/`0o`/`0x` or `Infinity` literals; a blank
/// string is `0`. Anything else is `NaN`.
///
/// # Example
/// ```
/// use abacus::interpreter::{evaluator::function::meta::to_number, value::core::Value};
///
/// assert_eq!(to_number(&[Value::from(" 2.5 ")]).unwrap(), Value::Number(2.5));
/// assert_eq!(to_number(&[Value::from("0x10")]).unwrap(), Value::Number(16.0));
/// assert_eq!(to_number(&[Value::Boolean(true)]).unwrap(), Value::Number(1.0));
/// ```
///
/// # Errors
/// Never fails; unconvertible input yields `NaN`.
pub fn to_number(args: &[Value]) -> EvalResult<Value> {
    let n = match &args[0] {
        Value::Number(n) => *n,
        Value::Boolean(b) => f64::from(u8::from(*b)),
        Value::Str(s) => parse_number(s),
        _ => f64::NAN,
    };
    Ok(Value::Number(n))
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if let Some(n) = parse_radix_literal(text) {
        return n;
    }

    // Rust accepts "inf" and "nan" spellings that are not number literals here.
    if unsigned.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// The display form of a value, upper-cased.
///
/// # Example
/// ```
/// use abacus::interpreter::{evaluator::function::meta::to_string, value::core::Value};
///
/// assert_eq!(to_string(&[Value::Number(0.1 + 0.2)]).unwrap(), Value::from("0.3"));
/// assert_eq!(to_string(&[Value::Boolean(true)]).unwrap(), Value::from("TRUE"));
/// ```
///
/// # Errors
/// Never fails.
pub fn to_string(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::from(args[0].to_string().to_uppercase()))
}

/// `FREEZE($NAME)`: makes a binding constant in the scope enclosing the
/// caller's and returns its value.
///
/// # Errors
/// `Redefinition` if the name is already frozen or not bound in that scope.
pub fn freeze(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    let name = args[0].as_reference()?;
    env.parent_or_self().freeze(name)?;
    env.get(name)
}

/// `ISDEF($NAME)`: whether the name is bound anywhere in the caller's scope
/// chain.
///
/// # Errors
/// `TypeMismatch` if the argument is not a reference.
pub fn is_defined(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    let name = args[0].as_reference()?;
    Ok(Value::Boolean(env.is_defined(name)))
}

/// `ISFROZEN($NAME)`: whether the nearest binding of the name is constant.
///
/// # Errors
/// `TypeMismatch` if the argument is not a reference.
pub fn is_frozen(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    let name = args[0].as_reference()?;
    Ok(Value::Boolean(env.is_defined(name) && env.is_constant(name)))
}

/// `RESOLVE($NAME)`: the value the name is bound to.
///
/// # Errors
/// `UndefinedName` if nothing binds it.
pub fn resolve(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    env.get(args[0].as_reference()?)
}

/// `DELETE($NAME)`: removes a mutable binding from the caller's own scope.
///
/// # Errors
/// `Redefinition` if the binding is constant, `UndefinedName` if the
/// caller's scope does not bind the name.
pub fn delete(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    env.delete(args[0].as_reference()?)
}

/// `ASSIGN($NAME, VALUE)`: binds the name in the caller's scope.
///
/// # Errors
/// `Redefinition` if the name is constant there.
pub fn assign(env: &Rc<Environment>, args: &[Value]) -> EvalResult<Value> {
    env.define(args[0].as_reference()?, args[1].clone())?;
    Ok(args[1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_follows_literal_rules() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("12abc").is_nan());
    }

    #[test]
    fn non_scalar_values_are_not_numbers() {
        let r = to_number(&[Value::from(vec![Value::Number(1.0)])]).unwrap();
        assert!(r.as_number().unwrap().is_nan());
    }

    #[test]
    fn assign_and_delete_work_on_the_callers_scope() {
        let root = Environment::root();
        let frame = Environment::child(&root);
        let name = Value::Reference("X".to_string());

        assign(&frame, &[name.clone(), Value::Number(3.0)]).unwrap();

        assert!(!root.is_defined("X"));
        assert_eq!(resolve(&frame, std::slice::from_ref(&name)).unwrap(), Value::Number(3.0));
        assert_eq!(delete(&frame, std::slice::from_ref(&name)).unwrap(), Value::Number(3.0));
        assert!(delete(&frame, &[name]).is_err());
    }

    #[test]
    fn freeze_targets_the_enclosing_scope() {
        let root = Environment::root();
        root.define("X", Value::Number(1.0)).unwrap();
        let call_frame = Environment::child(&root);
        let name = Value::Reference("X".to_string());

        let frozen = freeze(&call_frame, std::slice::from_ref(&name)).unwrap();

        assert_eq!(frozen, Value::Number(1.0));
        assert_eq!(is_frozen(&call_frame, std::slice::from_ref(&name)).unwrap(), Value::Boolean(true));
        assert!(freeze(&call_frame, &[name]).is_err());
    }
}
