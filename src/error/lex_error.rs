use thiserror::Error;

/// What went wrong at a given source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that does not begin any token, such as a lone `&` or `$`.
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A `"` with no closing quote before the end of input.
    #[error("Unterminated string")]
    UnterminatedString,
}

/// A lexical error together with the position it was found at.
///
/// Lines and columns are both 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    /// The failure itself.
    pub kind:   LexErrorKind,
    /// The source line where the error occurred.
    pub line:   usize,
    /// The column of the first offending character.
    pub column: usize,
}
