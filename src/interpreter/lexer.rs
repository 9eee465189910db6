use logos::Logos;
use tracing::trace;

use crate::{
    error::{LexError, LexErrorKind},
    util::num::parse_radix_literal,
};

/// The kinds of lexical token in the language.
///
/// Literal payloads travel inside the kind: numbers are already folded to
/// `f64`, strings have their quotes stripped and references their `$`.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// Numeric literals: `42`, `3.14`, `0b101`, `0o17`, `0x1F`.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse().ok())]
    #[regex(r"0b[01]+|0o[0-7]+|0x[0-9A-Fa-f]+", |lex| parse_radix_literal(lex.slice()))]
    Number(f64),
    /// String literals. There are no escapes and they may span lines.
    #[regex(r#""[^"]*""#, |lex| {
        let text = lex.slice();
        text[1..text.len() - 1].to_string()
    }, allow_greedy = true)]
    Str(String),
    /// A string that reaches the end of input without its closing quote.
    /// Reported as an error, never handed to the parser.
    #[regex(r#""[^"]*"#, allow_greedy = true)]
    UnterminatedStr,
    /// Names such as `X`, `SQRT` or `my_value`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `$NAME`, a reference to a binding rather than its value.
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Reference(String),
    /// `CONST`
    #[token("CONST")]
    Const,
    /// `FN`
    #[token("FN")]
    Fn,
    /// `TRUE`
    #[token("TRUE")]
    True,
    /// `FALSE`
    #[token("FALSE")]
    False,
    /// `IMPORT`
    #[token("IMPORT")]
    Import,
    /// `#[`, opens a pragma.
    #[token("#[")]
    PragmaOpen,
    /// `# Comments.` A `#` not followed by `[` runs to the end of the line.
    #[regex(r"#([^\[\n][^\n]*)?", logos::skip, allow_greedy = true)]
    Comment,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `/`
    #[token("/")]
    Slash,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `%`
    #[token("%")]
    Percent,
    /// `*`
    #[token("*")]
    Star,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`
    #[token("|")]
    Pipe,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `?`
    #[token("?")]
    Question,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// Line breaks only move the position counters.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// End of input. Appended by the scanner, never matched.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so that every
/// token can be given a 1-based line and column.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
    /// Byte offset of the last position whose column is known.
    anchor:         usize,
    /// Column of `anchor`.
    anchor_column:  usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:          1,
               line_start:    0,
               anchor:        0,
               anchor_column: 1, }
    }
}

impl LexerExtras {
    /// The 1-based column of `offset` on the current line.
    ///
    /// Offsets must not decrease between calls; only the characters since the
    /// previous call are counted.
    fn column_at(&mut self, source: &str, offset: usize) -> usize {
        if self.anchor < self.line_start {
            self.anchor = self.line_start;
            self.anchor_column = 1;
        }
        self.anchor_column += source.get(self.anchor..offset).map_or(0, |text| text.chars().count());
        self.anchor = offset;
        self.anchor_column
    }
}

/// A token with its source text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is.
    pub kind:   TokenKind,
    /// The exact source text, quotes and `$` included.
    pub lexeme: String,
    /// 1-based line of the first character.
    pub line:   usize,
    /// 1-based column of the first character.
    pub column: usize,
}

impl Token {
    /// Text used when the token appears in an error message.
    #[must_use]
    pub fn describe(&self) -> &str {
        if self.kind == TokenKind::Eof { "end of input" } else { &self.lexeme }
    }
}

/// Turns source text into tokens.
///
/// # Example
/// ```
/// use abacus::interpreter::lexer::{Scanner, TokenKind};
///
/// let tokens = Scanner::new("X = 0x10").scan_tokens(|e| panic!("{e}"));
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier("X".to_string()),
///                 TokenKind::Equals,
///                 TokenKind::Number(16.0),
///                 TokenKind::Eof]);
/// ```
pub struct Scanner<'s> {
    source: &'s str,
}

impl<'s> Scanner<'s> {
    #[must_use]
    pub const fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// Scans the whole source.
    ///
    /// Every lexical error is handed to `report` and scanning carries on with
    /// the next character, so the returned tokens are only meaningful when
    /// nothing was reported. The last token is always [`TokenKind::Eof`].
    pub fn scan_tokens(&self, mut report: impl FnMut(LexError)) -> Vec<Token> {
        let mut lexer = TokenKind::lexer_with_extras(self.source, LexerExtras::default());
        let mut tokens = Vec::new();

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let lexeme = lexer.slice();
            let line = lexer.extras.line;
            let column = lexer.extras.column_at(self.source, span.start);

            match result {
                Ok(TokenKind::UnterminatedStr) => {
                    report(LexError { kind: LexErrorKind::UnterminatedString,
                                      line,
                                      column });
                },
                Ok(kind) => tokens.push(Token { kind,
                                                lexeme: lexeme.to_string(),
                                                line,
                                                column }),
                Err(()) => {
                    let found = lexeme.chars().next().unwrap_or('\0');
                    report(LexError { kind: LexErrorKind::UnexpectedCharacter(found),
                                      line,
                                      column });
                },
            }

            // Strings are the only tokens that can contain line breaks.
            if let Some(last) = lexeme.rfind('\n') {
                lexer.extras.line += lexeme.matches('\n').count();
                lexer.extras.line_start = span.start + last + 1;
            }
        }

        let end = self.source.len();
        tokens.push(Token { kind:   TokenKind::Eof,
                            lexeme: String::new(),
                            line:   lexer.extras.line,
                            column: lexer.extras.column_at(self.source, end), });

        trace!(count = tokens.len(), "scanned tokens");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).scan_tokens(|e| panic!("unexpected error: {e}"))
                            .into_iter()
                            .map(|t| t.kind)
                            .collect()
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("CONST const"),
                   vec![TokenKind::Const,
                        TokenKind::Identifier("const".to_string()),
                        TokenKind::Eof]);
    }

    #[test]
    fn comments_and_pragmas_are_told_apart() {
        assert_eq!(kinds("#[OUTPUT()] # note\n1"),
                   vec![TokenKind::PragmaOpen,
                        TokenKind::Identifier("OUTPUT".to_string()),
                        TokenKind::LParen,
                        TokenKind::RParen,
                        TokenKind::RBracket,
                        TokenKind::Number(1.0),
                        TokenKind::Eof]);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens = Scanner::new("\"é\" X\n  Y").scan_tokens(|e| panic!("{e}"));

        assert_eq!((tokens[1].line, tokens[1].column), (1, 5));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 4));
    }

    #[test]
    fn positions_follow_multiline_strings() {
        let tokens = Scanner::new("\"a\nbc\" X").scan_tokens(|e| panic!("{e}"));

        assert_eq!(tokens[0].kind, TokenKind::Str("a\nbc".to_string()));
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 5));
    }
}
