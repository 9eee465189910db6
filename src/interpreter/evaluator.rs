/// Binary operator evaluation logic.
///
/// Arithmetic, comparisons and the same-tag equality operators, plus the
/// short-circuiting logical operators.
pub mod binary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its configuration, the statement loop that
/// produces the result stream, and expression dispatch.
pub mod core;

/// Function calls and the builtin library.
///
/// Handles arity checking, clause selection for user-defined functions and
/// the table of native builtins installed into every interpreter.
pub mod function;

/// Unary operator evaluation.
///
/// Negation, logical NOT and absolute value.
pub mod unary;

/// Utility functions for evaluation.
///
/// Scope push/pop around nested evaluation and name binding, including the
/// appending of clauses to existing functions.
pub mod utils;
