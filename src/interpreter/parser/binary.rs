use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses `||` chains.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
///
/// Guards of function declarations start at this level, so a guard never
/// swallows an assignment or a ternary.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_logical_and(tokens)?;
    while let Some(token) = tokens.next_if(|t| t.kind == TokenKind::DoublePipe) {
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::Or,
                               right: Box::new(right),
                               line:  token.line, };
    }
    Ok(left)
}

/// Parses `&&` chains.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_equality(tokens)?;
    while let Some(token) = tokens.next_if(|t| t.kind == TokenKind::DoubleAmpersand) {
        let right = parse_equality(tokens)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::And,
                               right: Box::new(right),
                               line:  token.line, };
    }
    Ok(left)
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(tokens,
                       parse_relational,
                       &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses comparisons.
///
/// The rule is: `relational := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(tokens,
                       parse_additive,
                       &[BinaryOperator::Less,
                         BinaryOperator::LessEqual,
                         BinaryOperator::Greater,
                         BinaryOperator::GreaterEqual])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(tokens,
                       parse_multiplicative,
                       &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "\" | "%") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(tokens,
                       parse_exponent,
                       &[BinaryOperator::Mul,
                         BinaryOperator::Div,
                         BinaryOperator::IntDiv,
                         BinaryOperator::Mod])
}

/// Parses exponentiation.
///
/// The rule is: `exponent := unary ("^" unary)*`. Like every other binary
/// level it associates to the left: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(tokens, parse_unary, &[BinaryOperator::Pow])
}

/// Parses one left-associative precedence level.
///
/// `operand` parses the next tighter level; `operators` are the operators
/// accepted between operands at this level.
fn parse_binary_level<'a, I>(tokens: &mut Peekable<I>,
                             operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                             operators: &[BinaryOperator])
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = operand(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && operators.contains(&op)
        {
            let line = token.line;
            tokens.next();
            let right = operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Backslash => Some(BinaryOperator::IntDiv),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
