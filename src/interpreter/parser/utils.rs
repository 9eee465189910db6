use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Builds a parse error pointing at `token`.
pub(in crate::interpreter::parser) fn error_at(token: &Token, reason: &str) -> ParseError {
    ParseError { lexeme: token.describe().to_string(),
                 line:   token.line,
                 column: token.column,
                 reason: reason.to_string(), }
}

/// Error for a token stream that ended without its `Eof` marker.
fn unexpected_end(reason: &str) -> ParseError {
    ParseError { lexeme: "end of input".to_string(),
                 line:   0,
                 column: 0,
                 reason: reason.to_string(), }
}

/// Consumes the next token if it has the given kind.
pub(in crate::interpreter::parser) fn match_kind<'a, I>(tokens: &mut Peekable<I>,
                                                        kind: &TokenKind)
                                                        -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|token| token.kind == *kind)
}

/// Consumes a token of the given kind or fails with `reason`.
pub(in crate::interpreter::parser) fn consume<'a, I>(tokens: &mut Peekable<I>,
                                                     kind: &TokenKind,
                                                     reason: &str)
                                                     -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    let token = peek_token(tokens, reason)?;
    if token.kind == *kind {
        tokens.next();
        Ok(token)
    } else {
        Err(error_at(token, reason))
    }
}

/// Returns the next token without consuming it, or fails with `reason` when
/// the stream is exhausted.
pub(in crate::interpreter::parser) fn peek_token<'a, I>(tokens: &mut Peekable<I>,
                                                        reason: &str)
                                                        -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().copied().ok_or_else(|| unexpected_end(reason))
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `TokenKind::Identifier`. Keywords are separate
/// token kinds and therefore never accepted here.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              reason: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    let token = peek_token(tokens, reason)?;
    match &token.kind {
        TokenKind::Identifier(name) => {
            tokens.next();
            Ok(name.clone())
        },
        _ => Err(error_at(token, reason)),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by vector literals, call arguments and parameter lists. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or a token other than
/// `,` or `closing` follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind,
    reason: &str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if match_kind(tokens, closing).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if match_kind(tokens, &TokenKind::Comma).is_none() {
            break;
        }
    }
    consume(tokens, closing, reason)?;
    Ok(items)
}

/// Parses a parameter list after its opening `(`, up to and including `)`.
///
/// Returns the names and whether they were written as a single destructured
/// vector `[A, B]`.
pub(in crate::interpreter::parser) fn parse_params<'a, I>(tokens: &mut Peekable<I>)
                                                          -> ParseResult<(Vec<String>, bool)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let param = |tokens: &mut Peekable<I>| parse_identifier(tokens, "Expect parameter name");

    if match_kind(tokens, &TokenKind::LBracket).is_some() {
        let params = parse_comma_separated(tokens,
                                           param,
                                           &TokenKind::RBracket,
                                           r#"Expect "]" after destructured parameters"#)?;
        if params.is_empty() {
            let token = peek_token(tokens, "Expect parameter name")?;
            return Err(error_at(token, "Expect at least one destructured parameter"));
        }
        consume(tokens, &TokenKind::RParen, r#"Expect ")" after function arguments"#)?;
        return Ok((params, true));
    }

    let params = parse_comma_separated(tokens,
                                       param,
                                       &TokenKind::RParen,
                                       r#"Expect ")" after function arguments"#)?;
    Ok((params, false))
}

/// Looks ahead, without consuming anything, for a function header.
///
/// A header is `NAME (` followed by tokens up to the matching `)` and then
/// `=`. Anything else, such as the call in `F(2) + 1`, is left to the
/// expression parser.
pub(in crate::interpreter::parser) fn is_function_header<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut scan = tokens.clone();

    if !matches!(scan.next().map(|t| &t.kind), Some(TokenKind::Identifier(_)))
       || !matches!(scan.next().map(|t| &t.kind), Some(TokenKind::LParen))
    {
        return false;
    }

    let mut depth = 1usize;
    for token in scan.by_ref() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            },
            TokenKind::Eof => return false,
            _ => {},
        }
    }

    depth == 0 && matches!(scan.next().map(|t| &t.kind), Some(TokenKind::Equals))
}
