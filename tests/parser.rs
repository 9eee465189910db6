use abacus::{
    error::SyntaxError,
    interpreter::parser::parse_source,
};
use pretty_assertions::assert_eq;

/// Parses `source` and renders every statement.
fn render(source: &str) -> Vec<String> {
    parse_source(source).unwrap_or_else(|e| panic!("{source}: {e}"))
                        .iter()
                        .map(ToString::to_string)
                        .collect()
}

fn render_one(source: &str) -> String {
    let mut statements = render(source);
    assert_eq!(statements.len(), 1, "{source}");
    statements.remove(0)
}

fn parse_error(source: &str) -> String {
    match parse_source(source) {
        Err(SyntaxError::Parse(e)) => e.to_string(),
        other => panic!("expected a parse error from {source}, got {other:?}"),
    }
}

#[test]
fn precedence_climbs_from_assignment_to_unary() {
    assert_eq!(render_one("X = 1 + 2 * 3 ^ 2"), "(expr (= X (+ 1 (* 2 (^ 3 2)))))");
    assert_eq!(render_one("A || B && C == D < E"),
               "(expr (|| A (&& B (== C (< D E)))))");
    assert_eq!(render_one("-X ^ 2"), "(expr (^ (- X) 2))");
    assert_eq!(render_one("!A == B"), "(expr (== (! A) B))");
}

#[test]
fn binary_levels_are_left_associative() {
    assert_eq!(render_one("1 - 2 - 3"), "(expr (- (- 1 2) 3))");
    assert_eq!(render_one("2 ^ 3 ^ 2"), "(expr (^ (^ 2 3) 2))");
    assert_eq!(render_one("8 \\ 3 % 2"), "(expr (% (\\ 8 3) 2))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(render_one("A = B = 1"), "(expr (= A (= B 1)))");
    assert_eq!(parse_error("1 = 2"), "Invalid assignment target but found =");
}

#[test]
fn ternaries_nest_to_the_right() {
    assert_eq!(render_one("A ? 1 : B ? 2 : 3"), "(expr (?: A 1 (?: B 2 3)))");
}

#[test]
fn primaries() {
    assert_eq!(render_one(r#"[1, "S", TRUE, $R, (X)]"#),
               r#"(expr (vec 1 "S" true (ref R) (group X)))"#);
    assert_eq!(render_one("|X - 1|"), "(expr (ABS (- X 1)))");
    assert_eq!(render_one("F(1)(2)"), "(expr (call (call F 1) 2))");
    assert_eq!(render_one("[]"), "(expr (vec))");
}

#[test]
fn function_declarations() {
    assert_eq!(render_one("F(X, Y) = X + Y"), "(expr (= F (fn (X Y) (+ X Y))))");
    assert_eq!(render_one("FN G() = 1"), "(expr (= G (fn () 1)))");
    assert_eq!(render_one("CONST H(X) = X, X > 0 && X < 9"),
               "(expr (const H (fn (X) X (&& (> X 0) (< X 9)))))");
    assert_eq!(render_one("CONST N = 3"), "(expr (const N 3))");
}

#[test]
fn a_call_is_not_mistaken_for_a_header() {
    assert_eq!(render_one("F(2) == 4"), "(expr (== (call F 2) 4))");
    assert_eq!(render_one("F(G(1)) + 1"), "(expr (+ (call F (call G 1)) 1))");
}

#[test]
fn with_blocks() {
    assert_eq!(render_one("WITH { A = 1, SQ(X) = X * X } SQ(A)"),
               "(expr (with (= A 1) (= SQ (fn (X) (* X X))) (call SQ A)))");
    assert_eq!(render_one("WITH + 1"), "(expr (+ WITH 1))");
    assert_eq!(parse_error("WITH { } 1"), "Expect at least one binding in WITH but found 1");
}

#[test]
fn imports_and_pragmas() {
    assert_eq!(render(r#"IMPORT "LIB.MATH"; #[OUTPUT(AST=FALSE, MODE=FAST, LEVEL=2)]"#),
               vec!["(import LIB.MATH)".to_string(),
                    "(pragma OUTPUT AST=false MODE=FAST LEVEL=2)".to_string()]);
    assert_eq!(render_one("#[RESET()]"), "(pragma RESET)");
    assert_eq!(parse_error("IMPORT LIB"), "Expect path after import keyword but found LIB");
    assert_eq!(parse_error("#[OUTPUT(AST=\"X\")]"),
               "Expected identifier, number, FALSE, or TRUE after attribute name but found \"X\"");
}

#[test]
fn statements_without_separators() {
    assert_eq!(render("X = 1\nY = 2"), vec!["(expr (= X 1))", "(expr (= Y 2))"]);
    assert_eq!(render("X = 1\n-2"), vec!["(expr (= X (- 1 2)))"]);
    assert_eq!(render(";;X;;"), vec!["(expr X)"]);
}

#[test]
fn errors_name_the_offending_token() {
    assert_eq!(parse_error("1 +"), "Expect expression but found end of input");
    assert_eq!(parse_error("(1"), r#"Expect ")" after expression but found end of input"#);
    assert_eq!(parse_error("F(X = 1"), r#"Expect ")" after arguments but found end of input"#);
}

#[test]
fn lexical_errors_win_over_parse_errors() {
    assert!(matches!(parse_source("1 + @"), Err(SyntaxError::Lex(_))));
}
