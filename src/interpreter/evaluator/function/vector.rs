use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::usize_to_f64,
};

/// `VECEMPTY(V)`: whether the vector has no elements.
///
/// # Errors
/// `TypeMismatch` if the argument is not a vector.
pub fn vec_empty(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Boolean(args[0].as_vector()?.is_empty()))
}

/// `VECHEAD(V)`: the first element.
///
/// # Errors
/// `EmptyVector` for `[]`.
pub fn vec_head(args: &[Value]) -> EvalResult<Value> {
    args[0].as_vector()?
           .first()
           .cloned()
           .ok_or(RuntimeError::EmptyVector { function: "VECHEAD" })
}

/// `VECTAIL(V)`: every element but the first.
///
/// # Example
/// ```
/// use abacus::interpreter::{evaluator::function::vector::vec_tail, value::core::Value};
///
/// let v = Value::from(vec![Value::Number(1.0), Value::Number(2.0)]);
/// assert_eq!(vec_tail(&[v]).unwrap().to_string(), "[2]");
/// ```
///
/// # Errors
/// `EmptyVector` for `[]`.
pub fn vec_tail(args: &[Value]) -> EvalResult<Value> {
    match args[0].as_vector()?.split_first() {
        Some((_, tail)) => Ok(Value::from(tail.to_vec())),
        None => Err(RuntimeError::EmptyVector { function: "VECTAIL" }),
    }
}

/// `VECLEN(V)`: the number of elements.
///
/// # Errors
/// `TypeMismatch` if the argument is not a vector.
pub fn vec_len(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(usize_to_f64(args[0].as_vector()?.len())))
}

/// `VECCONCAT(A, B)`: the elements of `A` followed by those of `B`.
///
/// # Errors
/// `TypeMismatch` if either argument is not a vector.
pub fn vec_concat(args: &[Value]) -> EvalResult<Value> {
    let (front, back) = (args[0].as_vector()?, args[1].as_vector()?);
    let mut elements = Vec::with_capacity(front.len() + back.len());
    elements.extend(front.iter().cloned());
    elements.extend(back.iter().cloned());
    Ok(Value::from(elements))
}
