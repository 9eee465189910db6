use std::iter::Peekable;

use crate::{
    ast::{Binding, Expr, FunctionExpr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{
                consume, error_at, match_kind, parse_comma_separated, parse_identifier,
                parse_params, peek_token,
            },
        },
    },
};

/// The contextual word that opens a block of local bindings.
const WITH_KEYWORD: &str = "WITH";

/// Parses prefix operators.
///
/// Grammar: `unary := ("!" | "-") unary | "|" expression "|" | call`
///
/// Negation and NOT nest (`--X`, `!!X`). The absolute-value bars enclose a
/// full expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens, "Expect expression")?;
    let op = match token.kind {
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Pipe => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            consume(tokens, &TokenKind::Pipe, r#"Expect "|" after expression"#)?;
            return Ok(Expr::Unary { op:   UnaryOperator::Abs,
                                    expr: Box::new(expr),
                                    line: token.line, });
        },
        _ => return parse_call(tokens),
    };

    tokens.next();
    let expr = parse_unary(tokens)?;
    Ok(Expr::Unary { op,
                     expr: Box::new(expr),
                     line: token.line })
}

/// Parses a primary expression followed by any number of argument lists.
///
/// Grammar: `call := primary ("(" arguments? ")")*`
///
/// Chained calls such as `MAKE(1)(2)` call the result of the previous call.
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut expr = parse_primary(tokens)?;
    while let Some(paren) = match_kind(tokens, &TokenKind::LParen) {
        let arguments = parse_comma_separated(tokens,
                                              parse_expression,
                                              &TokenKind::RParen,
                                              r#"Expect ")" after arguments"#)?;
        expr = Expr::Call { callee: Box::new(expr),
                            arguments,
                            line: paren.line };
    }
    Ok(expr)
}

/// Parses literals, names, references, groupings, vectors and `WITH` blocks.
///
/// Grammar:
/// ```text
/// primary := REFERENCE | TRUE | FALSE | NUMBER | STRING | with
///          | NAME | "(" expression ")" | "[" (expression ("," expression)*)? "]"
/// ```
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens, "Expect expression")?;
    let line = token.line;

    let expr = match &token.kind {
        TokenKind::Reference(name) => Expr::Reference { name: name.clone(),
                                                        line },
        TokenKind::True => Expr::Literal { value: LiteralValue::Bool(true),
                                           line },
        TokenKind::False => Expr::Literal { value: LiteralValue::Bool(false),
                                            line },
        TokenKind::Number(n) => Expr::Literal { value: LiteralValue::Number(*n),
                                                line },
        TokenKind::Str(s) => Expr::Literal { value: LiteralValue::Str(s.clone()),
                                             line },
        TokenKind::Identifier(name) if name == WITH_KEYWORD && starts_with_block(tokens) => {
            tokens.next();
            return parse_with(tokens, line);
        },
        TokenKind::Identifier(name) => Expr::Variable { name: name.clone(),
                                                        line },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            consume(tokens, &TokenKind::RParen, r#"Expect ")" after expression"#)?;
            return Ok(Expr::Grouping { expr: Box::new(expr),
                                       line });
        },
        TokenKind::LBracket => {
            tokens.next();
            let elements = parse_comma_separated(tokens,
                                                 parse_expression,
                                                 &TokenKind::RBracket,
                                                 r#"Expect "]" after vector elements"#)?;
            return Ok(Expr::Vector { elements, line });
        },
        _ => return Err(error_at(token, "Expect expression")),
    };

    tokens.next();
    Ok(expr)
}

/// Whether the token after the current one is `{`.
fn starts_with_block<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut scan = tokens.clone();
    scan.next();
    scan.next().is_some_and(|t| t.kind == TokenKind::LBrace)
}

/// Parses the remainder of a `WITH` block, after the `WITH` word.
///
/// Grammar:
/// ```text
/// with    := "WITH" "{" binding ("," binding)* "}" expression
/// binding := NAME ("(" params ")")? "=" expression
/// ```
fn parse_with<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    consume(tokens, &TokenKind::LBrace, r#"Expect "{" after WITH"#)?;
    let locals = parse_comma_separated(tokens,
                                       parse_binding,
                                       &TokenKind::RBrace,
                                       r#"Expect "}" after WITH bindings"#)?;
    if locals.is_empty() {
        let token = peek_token(tokens, "Expect expression")?;
        return Err(error_at(token, "Expect at least one binding in WITH"));
    }
    let body = parse_expression(tokens)?;

    Ok(Expr::With { locals,
                    body: Box::new(body),
                    line })
}

/// Parses one `NAME = value` or `NAME(params) = body` entry of a `WITH`
/// block. Local function declarations take no guard.
fn parse_binding<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Binding>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = peek_token(tokens, "Expect local name")?.line;
    let name = parse_identifier(tokens, "Expect local name")?;

    let value = if match_kind(tokens, &TokenKind::LParen).is_some() {
        let (params, destructured) = parse_params(tokens)?;
        consume(tokens, &TokenKind::Equals, r#"Expect "=" after function signature"#)?;
        let body = parse_expression(tokens)?;
        Expr::Function(FunctionExpr { params,
                                      destructured,
                                      body: Box::new(body),
                                      guard: None,
                                      line })
    } else {
        consume(tokens, &TokenKind::Equals, r#"Expect "=" after identifier"#)?;
        parse_expression(tokens)?
    };

    Ok(Binding { name, value, line })
}
