use std::{fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::callable::Callable},
    util::num::format_number,
};

/// Tag of [`Value::Boolean`].
pub const BOOL_TAG: &str = "BOOL";
/// Tag of [`Value::Number`].
pub const NUM_TAG: &str = "NUM";
/// Tag of [`Value::Str`].
pub const STR_TAG: &str = "STR";
/// Tag of [`Value::Callable`].
pub const FN_TAG: &str = "FN";
/// Tag of [`Value::Reference`].
pub const REF_TAG: &str = "REF";
/// Tag of [`Value::Error`].
pub const ERR_TAG: &str = "ERR";
/// Tag of [`Value::Vector`].
pub const VEC_TAG: &str = "VEC";

/// Represents a runtime value in the interpreter.
///
/// Values are immutable; the variants that own heap data share it through
/// `Rc`, so cloning a value is cheap.
#[derive(Debug, Clone)]
pub enum Value {
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// A double precision floating-point number.
    Number(f64),
    /// A string of text.
    Str(String),
    /// A native builtin or a user-defined function.
    Callable(Rc<Callable>),
    /// The name of a binding, written `$NAME`.
    Reference(String),
    /// An error turned into a value.
    Error(ErrorValue),
    /// An ordered sequence of values.
    Vector(Rc<Vec<Self>>),
}

/// A failure carried as a value, for instance in the result stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The full, human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RuntimeError> for ErrorValue {
    fn from(error: RuntimeError) -> Self {
        if error.is_internal() {
            Self::new(format!("Interpreter error: {error}"))
        } else {
            Self::new(error.to_string())
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Vector(Rc::new(v))
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Self::Callable(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Boolean(*b),
        }
    }
}

impl Value {
    /// The type tag reported by `TYPE` and used in type errors.
    ///
    /// # Example
    /// ```
    /// use abacus::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).tag(), "NUM");
    /// assert_eq!(Value::from(vec![]).tag(), "VEC");
    /// ```
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Boolean(_) => BOOL_TAG,
            Self::Number(_) => NUM_TAG,
            Self::Str(_) => STR_TAG,
            Self::Callable(_) => FN_TAG,
            Self::Reference(_) => REF_TAG,
            Self::Error(_) => ERR_TAG,
            Self::Vector(_) => VEC_TAG,
        }
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant. Nothing is truthy implicitly.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(BOOL_TAG)),
        }
    }

    /// Returns the numeric payload.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    ///
    /// # Example
    /// ```
    /// use abacus::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number().unwrap(), 2.5);
    /// assert!(Value::from("2.5").as_number().is_err());
    /// ```
    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.mismatch(NUM_TAG)),
        }
    }

    /// Returns the string payload.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    pub fn as_str(&self) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(self.mismatch(STR_TAG)),
        }
    }

    /// Returns the callable payload.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    pub fn as_callable(&self) -> EvalResult<&Rc<Callable>> {
        match self {
            Self::Callable(c) => Ok(c),
            _ => Err(self.mismatch(FN_TAG)),
        }
    }

    /// Returns the name a reference points at.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    pub fn as_reference(&self) -> EvalResult<&str> {
        match self {
            Self::Reference(name) => Ok(name),
            _ => Err(self.mismatch(REF_TAG)),
        }
    }

    /// Returns the error payload.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    pub fn as_error(&self) -> EvalResult<&ErrorValue> {
        match self {
            Self::Error(e) => Ok(e),
            _ => Err(self.mismatch(ERR_TAG)),
        }
    }

    /// Returns the vector elements.
    ///
    /// # Errors
    /// `TypeMismatch` for any other variant.
    pub fn as_vector(&self) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::Vector(v) => Ok(v),
            _ => Err(self.mismatch(VEC_TAG)),
        }
    }

    /// Checks that `other` has the same tag as `self`.
    ///
    /// Equality operators call this first, so comparing values of different
    /// types is an error rather than `FALSE`.
    ///
    /// # Errors
    /// `TypeMismatch` naming `self`'s tag as the expected one.
    pub fn assert_same_tag(&self, other: &Self) -> EvalResult<()> {
        if self.tag() == other.tag() { Ok(()) } else { Err(other.mismatch(self.tag())) }
    }

    fn mismatch(&self, expected: &'static str) -> RuntimeError {
        RuntimeError::TypeMismatch { expected,
                                     actual: self.tag(),
                                     payload: self.to_string() }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) | (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => Rc::ptr_eq(a, b),
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Vector(a), Self::Vector(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Callable(c) => write!(f, "{c}"),
            Self::Reference(name) => write!(f, "${name}"),
            Self::Error(e) => write!(f, "{e}"),
            Self::Vector(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
        }
    }
}
