/// Lexical errors.
///
/// Raised by the scanner for characters that cannot start any token and for
/// string literals that never close. Scanning continues after each one so a
/// single pass reports every lexical problem in the source.
pub mod lex_error;
/// Module retrieval errors.
///
/// Produced by a [`SourceLoader`](crate::interpreter::import::SourceLoader)
/// when the text behind an `IMPORT` path cannot be obtained.
pub mod load_error;
/// Parsing errors.
///
/// A parse error names the offending token and its position together with a
/// short reason describing what the parser expected instead.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing statements:
/// type mismatches, arity violations, redefinitions of frozen names, lookups of
/// undefined names, failed assertions and failed imports.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use load_error::LoadError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error that prevents source text from becoming statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The scanner rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token stream.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
