use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_logical_or,
            utils::{consume, error_at, match_kind},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_assignment(tokens)
}

/// Parses a right-associative assignment.
///
/// Grammar: `assignment := ternary ("=" assignment)?`
///
/// # Errors
/// `Invalid assignment target` when the left side is anything but a plain
/// variable name.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let target = parse_ternary(tokens)?;

    let Some(equals) = match_kind(tokens, &TokenKind::Equals) else {
        return Ok(target);
    };
    let value = parse_assignment(tokens)?;

    match target {
        Expr::Variable { name, line } => Ok(Expr::Assign { name,
                                                          value: Box::new(value),
                                                          is_const: false,
                                                          line }),
        _ => Err(error_at(equals, "Invalid assignment target")),
    }
}

/// Parses a conditional expression.
///
/// Grammar: `ternary := logical_or ("?" expression ":" expression)?`
fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let condition = parse_logical_or(tokens)?;

    let Some(question) = match_kind(tokens, &TokenKind::Question) else {
        return Ok(condition);
    };
    let then_branch = parse_expression(tokens)?;
    consume(tokens, &TokenKind::Colon, r#"Expect ":" after expression"#)?;
    let else_branch = parse_expression(tokens)?;

    Ok(Expr::Ternary { condition:   Box::new(condition),
                       then_branch: Box::new(then_branch),
                       else_branch: Box::new(else_branch),
                       line:        question.line, })
}
