/// The builtin table.
///
/// Lists every native function with its arity and installs them as
/// constants in a root scope.
pub mod builtin;

/// Function call evaluation.
///
/// Arity checks, argument binding and first-match clause dispatch for
/// user-defined functions.
pub mod core;

/// Numeric builtins: trigonometry, rounding, logarithm and random numbers.
pub mod math;

/// Builtins working on values and references: assertions, type conversion
/// and the scope meta-operations.
pub mod meta;

pub mod vector;
