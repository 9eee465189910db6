use thiserror::Error;

/// A syntax error found while building the AST.
///
/// The parser stops at the first one; `lexeme` is the text of the token it
/// could not accept (or `end of input`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} but found {lexeme}")]
pub struct ParseError {
    /// Text of the offending token.
    pub lexeme: String,
    /// The source line where the error occurred.
    pub line:   usize,
    /// The column where the offending token starts.
    pub column: usize,
    /// What the parser expected at this point.
    pub reason: String,
}
