use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionExpr, PragmaValue, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_logical_or,
            core::{ParseResult, parse_expression},
            utils::{
                consume, error_at, is_function_header, match_kind, parse_identifier, parse_params,
                peek_token,
            },
        },
    },
};

/// Parses a whole token stream into statements.
///
/// Grammar: `program := (declaration ";"?)* EOF`
///
/// Parsing stops at the first error, which is handed to `report`; the
/// statements parsed before it are still returned.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>,
                            mut report: impl FnMut(ParseError))
                            -> Vec<Stmt>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut statements = Vec::new();

    loop {
        while match_kind(tokens, &TokenKind::Semicolon).is_some() {}
        if tokens.peek().is_none_or(|t| t.kind == TokenKind::Eof) {
            break;
        }
        match parse_declaration(tokens) {
            Ok(statement) => statements.push(statement),
            Err(e) => {
                report(e);
                break;
            },
        }
    }

    statements
}

/// Parses a single declaration.
///
/// Grammar:
/// ```text
/// declaration := importDecl | pragmaDecl | constDecl | fnDecl | expression
/// ```
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens, "Expect expression")?;
    let line = token.line;

    let expr = match token.kind {
        TokenKind::Import => {
            tokens.next();
            return parse_import(tokens, line);
        },
        TokenKind::PragmaOpen => {
            tokens.next();
            return parse_pragma(tokens, line);
        },
        TokenKind::Const => {
            tokens.next();
            parse_const_declaration(tokens, line)?
        },
        TokenKind::Fn => {
            tokens.next();
            let name = parse_identifier(tokens, "Expect function name")?;
            consume(tokens, &TokenKind::LParen, r#"Expect "(" after function name"#)?;
            parse_function_declaration(tokens, name, false, line)?
        },
        TokenKind::Identifier(_) if is_function_header(tokens) => {
            let name = parse_identifier(tokens, "Expect function name")?;
            consume(tokens, &TokenKind::LParen, r#"Expect "(" after function name"#)?;
            parse_function_declaration(tokens, name, false, line)?
        },
        _ => parse_expression(tokens)?,
    };

    Ok(Stmt::Expression { expr, line })
}

/// Parses `IMPORT "path"` after the keyword.
fn parse_import<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens, "Expect path after import keyword")?;
    match &token.kind {
        TokenKind::Str(path) => {
            tokens.next();
            Ok(Stmt::Import { path: path.clone(),
                              line })
        },
        _ => Err(error_at(token, "Expect path after import keyword")),
    }
}

/// Parses a pragma after its `#[` opener.
///
/// Grammar:
/// ```text
/// pragma := "#[" NAME "(" (NAME "=" value ("," NAME "=" value)*)? ")" "]"
/// value  := NAME | NUMBER | TRUE | FALSE
/// ```
fn parse_pragma<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token> + Clone
{
    let name = parse_identifier(tokens, "Expect pragma name")?;
    consume(tokens, &TokenKind::LParen, r#"Expect "(" after pragma name"#)?;

    let mut attributes = Vec::new();
    if match_kind(tokens, &TokenKind::RParen).is_none() {
        loop {
            let key = parse_identifier(tokens, "Expect pragma attribute name")?;
            consume(tokens, &TokenKind::Equals, r#"Expect "=" after pragma attribute name"#)?;
            attributes.push((key, parse_pragma_value(tokens)?));
            if match_kind(tokens, &TokenKind::Comma).is_none() {
                break;
            }
        }
        consume(tokens, &TokenKind::RParen, r#"Expect ")" after pragma attributes"#)?;
    }
    consume(tokens, &TokenKind::RBracket, r#"Expect "]" at the end of pragma"#)?;

    Ok(Stmt::Pragma { name,
                      attributes,
                      line })
}

fn parse_pragma_value<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<PragmaValue>
    where I: Iterator<Item = &'a Token> + Clone
{
    const REASON: &str = "Expected identifier, number, FALSE, or TRUE after attribute name";

    let token = peek_token(tokens, REASON)?;
    let value = match &token.kind {
        TokenKind::Identifier(name) => PragmaValue::Name(name.clone()),
        TokenKind::Number(n) => PragmaValue::Number(*n),
        TokenKind::True => PragmaValue::Bool(true),
        TokenKind::False => PragmaValue::Bool(false),
        _ => return Err(error_at(token, REASON)),
    };
    tokens.next();
    Ok(value)
}

/// Parses a constant declaration after `CONST`.
///
/// Grammar: `constDecl := "CONST" "FN"? NAME ("(" params ")")? "=" expression ("," guard)?`
///
/// A guard is only accepted when a parameter list is present.
fn parse_const_declaration<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let explicit_fn = match_kind(tokens, &TokenKind::Fn).is_some();
    let name = parse_identifier(tokens, "Expect constant name")?;

    if explicit_fn {
        consume(tokens, &TokenKind::LParen, r#"Expect "(" after function name"#)?;
        return parse_function_declaration(tokens, name, true, line);
    }
    if match_kind(tokens, &TokenKind::LParen).is_some() {
        return parse_function_declaration(tokens, name, true, line);
    }

    consume(tokens, &TokenKind::Equals, r#"Expect "=" after identifier"#)?;
    let value = parse_expression(tokens)?;

    Ok(Expr::Assign { name,
                      value: Box::new(value),
                      is_const: true,
                      line })
}

/// Parses a function declaration from just after its opening `(`.
///
/// Grammar: `fnDecl := NAME "(" params ")" "=" expression ("," guard)?` where
/// `guard := logical_or`.
///
/// The result is an assignment of a function literal to `name`; the
/// evaluator decides whether it starts a new function or adds a clause to an
/// existing one.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     name: String,
                                     is_const: bool,
                                     line: usize)
                                     -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (params, destructured) = parse_params(tokens)?;
    consume(tokens, &TokenKind::Equals, r#"Expect "=" after function signature"#)?;
    let body = parse_expression(tokens)?;

    let guard = match match_kind(tokens, &TokenKind::Comma) {
        Some(_) => Some(Box::new(parse_logical_or(tokens)?)),
        None => None,
    };

    let function = FunctionExpr { params,
                                  destructured,
                                  body: Box::new(body),
                                  guard,
                                  line };

    Ok(Expr::Assign { name,
                      value: Box::new(Expr::Function(function)),
                      is_const,
                      line })
}
