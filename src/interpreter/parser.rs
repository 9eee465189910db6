use crate::{
    ast::Stmt,
    error::{ParseError, SyntaxError},
    interpreter::lexer::{Scanner, Token},
};

/// Binary operator parsing.
///
/// One function per precedence level, from `||` down to `^`.
pub mod binary;
/// Core expression entry points: assignment and the ternary operator.
pub mod core;
/// Declarations: imports, pragmas, constants and function headers.
pub mod statement;
/// Prefix operators, calls and primary expressions.
pub mod unary;
/// Token-level helpers shared by the other parser modules.
pub mod utils;

/// Parses a scanned token stream.
///
/// The stream must end with `Eof`, as produced by
/// [`Scanner::scan_tokens`]. The first syntax error is handed to `report`
/// and ends parsing; everything parsed before it is returned.
pub fn parse(tokens: &[Token], report: impl FnMut(ParseError)) -> Vec<Stmt> {
    statement::parse_program(&mut tokens.iter().peekable(), report)
}

/// Scans and parses source text in one go.
///
/// # Errors
/// Returns the first lexical error, or the parse error if scanning
/// succeeded.
///
/// # Example
/// ```
/// use abacus::interpreter::parser::parse_source;
///
/// let statements = parse_source("X = 1; X + 1").unwrap();
/// assert_eq!(statements.len(), 2);
///
/// assert!(parse_source("1 +").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Vec<Stmt>, SyntaxError> {
    let mut lex_error = None;
    let tokens = Scanner::new(source).scan_tokens(|e| {
                                         lex_error.get_or_insert(e);
                                     });
    if let Some(e) = lex_error {
        return Err(e.into());
    }

    let mut parse_error = None;
    let statements = parse(&tokens, |e| {
        parse_error.get_or_insert(e);
    });
    parse_error.map_or(Ok(statements), |e| Err(e.into()))
}
