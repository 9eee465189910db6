use thiserror::Error;

use crate::error::LoadError;

/// Represents all errors that can occur while executing a statement.
///
/// A runtime error aborts the statement that raised it and halts the run it
/// belongs to. The interpreter keeps every definition made before the failing
/// statement.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A value had a different type than the operation required.
    #[error("{payload} is a {actual}, not a {expected}")]
    TypeMismatch {
        /// Tag of the type that was required.
        expected: &'static str,
        /// Tag of the value that was supplied.
        actual:   &'static str,
        /// Display form of the supplied value.
        payload:  String,
    },
    /// A callable received a number of arguments outside its arity.
    #[error("{name} expects {} but got {found}", describe_arity(.min, .max))]
    Arity {
        /// Name the callable was invoked through.
        name:  String,
        /// Fewest arguments accepted.
        min:   usize,
        /// Most arguments accepted.
        max:   usize,
        /// Number of arguments supplied.
        found: usize,
    },
    /// A name could not be (re)bound.
    #[error("Cannot redefine {name}: {reason}")]
    Redefinition {
        /// The name being bound.
        name:   String,
        /// Why the binding was refused.
        reason: &'static str,
    },
    /// A clause was declared for a name bound to a builtin.
    #[error("Cannot redefine {name}: cannot extend a native function")]
    NativeExtension {
        /// The name being declared.
        name: String,
    },
    /// A lookup found no binding anywhere in the scope chain.
    #[error("Undefined name {name}")]
    UndefinedName {
        /// The name looked up.
        name: String,
    },
    /// `ASSERT` received a false condition.
    #[error("{message}")]
    UserAssertion {
        /// The message passed to `ASSERT`, or the default one.
        message: String,
    },
    /// A vector builtin that needs at least one element got an empty vector.
    #[error("Empty vector passed to {function}")]
    EmptyVector {
        /// The builtin that was called.
        function: &'static str,
    },
    /// A pragma declaration that cannot be turned into a directive.
    #[error("Invalid pragma: {details}")]
    InvalidPragma {
        /// What is wrong with it.
        details: String,
    },
    /// The source behind an `IMPORT` could not be retrieved.
    #[error("Cannot import {path}: {source}")]
    Import {
        /// The path named by the import statement.
        path:   String,
        /// Why retrieval failed.
        #[source]
        source: LoadError,
    },
    /// Calls and `WITH` blocks nested deeper than the interpreter allows.
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepth {
        /// The nesting limit that was hit.
        limit: usize,
    },
    /// The bundled standard library failed to run during start-up.
    #[error("Failed to load the standard library: {message}")]
    Bootstrap {
        /// The first error entry reported by the library run.
        message: String,
    },
}

impl RuntimeError {
    /// Whether the error comes from the interpreter's own checks rather than
    /// from a value, a binding or a builtin of the program being run.
    ///
    /// Only these are shown with the `Interpreter error: ` prefix; an
    /// `ASSERT` failure shows its message unchanged.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self,
                 Self::Arity { .. }
                 | Self::NativeExtension { .. }
                 | Self::InvalidPragma { .. }
                 | Self::Import { .. }
                 | Self::Bootstrap { .. })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_arity(min: &usize, max: &usize) -> String {
    match (*min, *max) {
        (1, 1) => "1 argument".to_string(),
        (min, max) if min == max => format!("{min} arguments"),
        (min, max) => format!("{min} to {max} arguments"),
    }
}
