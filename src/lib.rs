//! # abacus
//!
//! abacus is a small calculator language with a tree-walking interpreter.
//! It scans, parses and evaluates scripts made of numbers, strings, vectors,
//! closures and guarded multi-clause functions, and reports each statement's
//! outcome as an ordered result stream a host can render.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    result::InterpreterResult,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums that represent the
/// syntactic structure of source code as a tree, plus the printer that
/// renders them back as s-expressions. The AST is built by the parser and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches line numbers to AST nodes for error reporting.
/// - Renders nodes in the canonical echo format.
pub mod ast;
/// Provides unified error types for scanning, parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// loading modules or evaluating code. It standardizes error reporting and
/// carries the source location or offending value needed for user feedback.
///
/// # Responsibilities
/// - Defines error types for every failure mode (lexer, parser, loader,
///   evaluator).
/// - Attaches line and column numbers where the source is known.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, scopes, values and
/// module loading to provide a complete runtime for scripts. It exposes the
/// public API for running source text.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General helpers shared across phases.
///
/// # Responsibilities
/// - Format numbers for display.
/// - Fold radix literals and convert lengths to numbers.
pub mod util;

/// Runs `source` in a fresh interpreter with the standard library loaded.
///
/// Convenient for one-off evaluation; keep an [`Interpreter`] around instead
/// when definitions should survive between runs.
///
/// # Errors
/// Returns an error only if the standard library fails to load. Problems in
/// `source` itself are reported as error entries of the result.
///
/// # Examples
/// ```
/// use abacus::{interpreter::value::core::Value, run_source};
///
/// let result = run_source("SQRT(16) + 1").unwrap();
/// assert!(!result.has_error);
/// assert_eq!(result.last_value(), Some(&Value::Number(5.0)));
///
/// // Example with an intentional error (undefined name).
/// let result = run_source("Y = X + 1").unwrap();
/// assert!(result.has_error);
/// ```
pub fn run_source(source: &str) -> EvalResult<InterpreterResult> {
    let mut interpreter = Interpreter::new()?;
    Ok(interpreter.run(source))
}
