use std::fs;

use abacus::interpreter::{
    evaluator::core::Interpreter,
    result::{InterpreterResult, ResultEntry},
    value::core::Value,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn script_files_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let result = run(&content);
        if result.has_error {
            panic!("Script {path:?} failed:\n{}", describe_errors(&result));
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run(src: &str) -> InterpreterResult {
    let mut interpreter = Interpreter::new().unwrap();
    interpreter.run(src)
}

fn describe_errors(result: &InterpreterResult) -> String {
    result.errors().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

fn assert_success(src: &str) {
    let result = run(src);
    if result.has_error {
        panic!("Script failed: {}", describe_errors(&result));
    }
}

fn assert_failure(src: &str) {
    if !run(src).has_error {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Runs `src` and returns the display form of its last value.
fn eval(src: &str) -> String {
    let result = run(src);
    if result.has_error {
        panic!("Script failed: {}", describe_errors(&result));
    }
    result.last_value()
          .unwrap_or_else(|| panic!("{src} produced no value"))
          .to_string()
}

/// Runs `src` and returns the single error message it produced.
fn error_of(src: &str) -> String {
    let result = run(src);
    let errors: Vec<_> = result.errors().map(ToString::to_string).collect();
    assert_eq!(errors.len(), 1, "expected one error from {src}");
    errors[0].clone()
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("X = 1 + 2; ASSERT(X == 3)");
    assert_success("X = 7 * 9; ASSERT(X == 63)");
    assert_success("X = 8 - 5; ASSERT(X == 3)");
    assert_success("X = 10 / 4; ASSERT(X == 2.5)");
}

#[test]
fn operator_precedence_and_associativity() {
    assert_eq!(eval("1 + 2 * 3"), "7");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("10 - 4 - 3"), "3");
    assert_eq!(eval("2 ^ 3 ^ 2"), "64");
    assert_eq!(eval("-2 ^ 2"), "4");
    assert_eq!(eval("1 < 2 == TRUE"), "true");
}

#[test]
fn floor_division_and_remainder() {
    assert_eq!(eval("7 \\ 2"), "3");
    assert_eq!(eval("-7 \\ 2"), "-4");
    assert_eq!(eval("7 % 3"), "1");
    assert_eq!(eval("-7 % 3"), "-1");
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_eq!(eval("1 / 0"), "Infinity");
    assert_eq!(eval("-1 / 0"), "-Infinity");
    assert_eq!(eval("0 / 0"), "NaN");
    assert_eq!(eval("0 / 0 == 0 / 0"), "false");
}

#[test]
fn numbers_display_with_ten_significant_digits() {
    assert_eq!(eval("0.1 + 0.2"), "0.3");
    assert_eq!(eval("1 / 3"), "0.3333333333");
    assert_eq!(eval("2 ^ 40"), "1.099511628e+12");
    assert_eq!(eval("-0"), "0");
}

#[test]
fn display_ties_round_to_the_larger_magnitude() {
    assert_eq!(eval("1234567890.5"), "1234567891");
    assert_eq!(eval("123456789.25"), "123456789.3");
    assert_eq!(eval("12345678905"), "1.234567891e+10");
    assert_eq!(eval("STR(-123456789.25)"), "-123456789.3");
}

#[test]
fn evaluation_is_repeatable() {
    assert_success("ASSERT(STR(1 / 7) == STR(1 / 7))");

    let mut interpreter = Interpreter::new().unwrap();
    let first = interpreter.run("SQRT(2) * PI").last_value().cloned();
    let second = interpreter.run("SQRT(2) * PI").last_value().cloned();
    assert_eq!(first.map(|v| v.to_string()), second.map(|v| v.to_string()));
}

#[test]
fn radix_literals() {
    assert_eq!(eval("0x1F"), "31");
    assert_eq!(eval("0o17 + 0b101"), "20");
}

#[test]
fn unary_operators() {
    assert_eq!(eval("|-3.5|"), "3.5");
    assert_eq!(eval("|2 - 5| + 1"), "4");
    assert_eq!(eval("!FALSE"), "true");
    assert_eq!(eval("--4"), "4");
    assert_failure("!1");
    assert_failure("-TRUE");
}

#[test]
fn equality_requires_matching_types() {
    assert_eq!(eval(r#""ABC" == "ABC""#), "true");
    assert_eq!(eval("[1, [2, 3]] == [1, [2, 3]]"), "true");
    assert_eq!(eval("[1, 2] != [1, 2, 3]"), "true");
    assert_eq!(eval("$X == $X"), "true");
    assert_eq!(error_of(r#"1 == "1""#), "1 is a STR, not a NUM");
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval("FALSE && NOPE"), "false");
    assert_eq!(eval("TRUE || NOPE"), "true");
    assert_eq!(eval("TRUE && 1 < 2"), "true");
    assert_failure("TRUE && NOPE");
    assert_failure("1 && TRUE");
}

#[test]
fn ternary_requires_a_boolean_condition() {
    assert_eq!(eval("1 < 2 ? 10 : 20"), "10");
    assert_eq!(eval("FALSE ? 1 : TRUE ? 2 : 3"), "2");
    assert_failure("1 ? 2 : 3");
}

#[test]
fn constants_cannot_be_reassigned() {
    assert_success("CONST A = 1; ASSERT(ISFROZEN($A))");
    assert_eq!(error_of("CONST A = 1; A = 2"),
               "Cannot redefine A: name is frozen");
    assert_failure("CONST A = 1; CONST A = 2");
    assert_failure("PI = 3");
    assert_failure("SIN = 3");
}

#[test]
fn freeze_makes_a_binding_constant() {
    assert_success("X = 1; ASSERT(!ISFROZEN($X)); FREEZE($X); ASSERT(ISFROZEN($X))");
    assert_eq!(eval("X = 5; FREEZE($X)"), "5");
    assert_failure("X = 1; FREEZE($X); X = 2");
    assert_failure("X = 1; FREEZE($X); FREEZE($X)");
    assert_failure("FREEZE($NOT_DEFINED)");
}

#[test]
fn freeze_from_a_function_reaches_the_callers_scope() {
    assert_success("LOCK(R) = FREEZE(R); X = 1; LOCK($X); ASSERT(ISFROZEN($X))");
}

#[test]
fn reference_builtins() {
    assert_eq!(eval("X = 4; RESOLVE($X) * 2"), "8");
    assert_eq!(eval("ASSIGN($Y, 7); Y"), "7");
    assert_eq!(eval("ISDEF($Y)"), "false");
    assert_eq!(eval("TYPE($Y)"), "REF");
    assert_eq!(eval("$Y"), "$Y");
    assert_eq!(eval("X = 3; DELETE($X)"), "3");
    assert_failure("X = 3; DELETE($X); X");
    assert_failure("CONST X = 3; DELETE($X)");
    assert_failure("RESOLVE(1)");
}

#[test]
fn undefined_names_are_errors() {
    assert_eq!(error_of("X + 1"), "Undefined name X");
}

#[test]
fn functions_and_recursion() {
    assert_eq!(eval("SQUARE(X) = X * X; SQUARE(7)"), "49");
    assert_eq!(eval("FACT(N) = 1, N <= 1; FACT(N) = N * FACT(N - 1); FACT(10)"),
               "3628800");
    assert_eq!(eval("FN K() = 42; K()"), "42");
    assert_eq!(eval("CONST FN TWICE(F, X) = F(F(X)); INC(X) = X + 1; TWICE(INC, 5)"),
               "7");
}

#[test]
fn function_values_display() {
    assert_eq!(eval("F(X) = X; F"), "<fn>");
    assert_eq!(eval("SIN"), "<native SIN>");
    assert_eq!(eval("TYPE(SIN)"), "FN");
}

#[test]
fn clauses_dispatch_in_declaration_order() {
    let src = "F(X) = 1, X < 0
               F(X) = 2, X == 0
               F(X) = 3";
    assert_eq!(eval(&format!("{src}; F(-5)")), "1");
    assert_eq!(eval(&format!("{src}; F(0)")), "2");
    assert_eq!(eval(&format!("{src}; F(7)")), "3");
}

#[test]
fn unmatched_clauses_raise_an_assertion() {
    assert_eq!(error_of("G(X) = 1, X > 0; G(-1)"), "Assert error");
}

#[test]
fn clauses_cannot_follow_an_unconditional_one() {
    assert_eq!(error_of("F(X) = 1; F(X) = 2, X > 0"),
               "Cannot redefine F: a clause without a guard already matches \
                every call");
    assert_failure("SIN(X) = 1, X > 0");
    assert_eq!(error_of("S = SIN; S(X) = 1, X > 0"),
               "Interpreter error: Cannot redefine S: cannot extend a native function");
}

#[test]
fn delete_reopens_a_closed_function() {
    assert_success("H(X) = 1; DELETE($H); H(X) = 2, X > 0; H(X) = 3; ASSERT(H(1) == 2); \
                    ASSERT(H(0) == 3)");
}

#[test]
fn appending_a_clause_leaves_aliases_alone() {
    let src = "P(X) = 1, X > 0; Q = P; P(X) = 2";
    assert_eq!(eval(&format!("{src}; P(-1)")), "2");
    assert_eq!(error_of(&format!("{src}; Q(-1)")), "Assert error");
}

#[test]
fn arity_is_checked_before_the_call() {
    assert_eq!(error_of("SIN(1, 2)"), "Interpreter error: SIN expects 1 argument but got 2");
    assert_eq!(error_of("F(A, B) = A; F(1)"),
               "Interpreter error: F expects 2 arguments but got 1");
    assert_eq!(error_of("ASSERT()"), "Interpreter error: ASSERT expects 1 to 2 arguments but got 0");
    assert_failure("RND(1)");
    assert_failure("ATAN2(1)");
    assert_failure("ATAN2(1, 2, 3)");
    assert_success("ASSERT(ATAN2(1, 1) > 0)");
}

#[test]
fn arguments_are_not_evaluated_on_arity_failure() {
    let mut interpreter = Interpreter::new().unwrap();
    let result = interpreter.run("SIN(ASSIGN($X, 1), 2)");
    assert!(result.has_error);
    assert!(!interpreter.globals().is_defined("X"));
}

#[test]
fn direct_calls_check_arity() {
    let mut interpreter = Interpreter::new().unwrap();
    let atan2 = interpreter.globals().get("ATAN2").unwrap();
    let callable = atan2.as_callable().unwrap();

    let err = interpreter.call("ATAN2", callable, &[Value::Number(1.0)]).unwrap_err();
    assert_eq!(err.to_string(), "ATAN2 expects 2 arguments but got 1");

    let value = interpreter.call("ATAN2", callable, &[Value::Number(0.0), Value::Number(1.0)])
                           .unwrap();
    assert_eq!(value, Value::Number(0.0));
}

#[test]
fn calling_a_non_function_fails() {
    assert_eq!(error_of("X = 3; X(1)"), "3 is a NUM, not a FN");
}

#[test]
fn destructured_parameters() {
    assert_eq!(eval("SWAP([A, B]) = [B, A]; SWAP([1, 2])"), "[2, 1]");
    assert_failure("SWAP([A, B]) = [B, A]; SWAP([1])");
    assert_failure("SWAP([A, B]) = [B, A]; SWAP(1)");
    assert_failure("SWAP([A, B]) = [B, A]; SWAP([1, 2], [3, 4])");
}

#[test]
fn closures_capture_their_defining_scope() {
    assert_eq!(eval("ADDER(N) = WITH { ADD(X) = X + N } ADD; ADD2 = ADDER(2); ADD2(3)"),
               "5");
    assert_eq!(eval("N = 10; GET() = N; N = 20; GET()"), "20");
}

#[test]
fn with_blocks_bind_locals_in_order() {
    assert_eq!(eval("WITH { A = 1, B = A + 1 } A + B"), "3");
    assert_failure("WITH { A = 1 } A; A");
    assert_eq!(eval("A = 5; WITH { A = 1 } A; A"), "5");
    assert_eq!(eval("WITH { SQ(X) = X * X } SQ(4)"), "16");
}

#[test]
fn with_locals_shadow_outer_functions() {
    assert_eq!(eval("SQ(X) = X; WITH { SQ(X) = X * X } SQ(3)"), "9");
    assert_eq!(eval("SQ(X) = X; WITH { SQ(X) = X * X } SQ(3); SQ(3)"), "3");
    assert_eq!(eval("G(X) = 1, X < 0; WITH { G(X) = 2 } G(-1)"), "2");
    assert_eq!(eval("WITH { SIN = 2 } SIN * 3"), "6");
}

#[test]
fn runaway_recursion_halts_the_run() {
    let mut interpreter = Interpreter::new().unwrap();

    let result = interpreter.run("F(X) = F(X); F(1); Y = 2");
    assert_eq!(describe_errors(&result), "Maximum call depth of 5000 exceeded");
    assert!(!interpreter.globals().is_defined("Y"));

    let after = interpreter.run("Z = 1 + 1");
    assert!(!after.has_error);
    assert_eq!(after.last_value(), Some(&Value::Number(2.0)));
    assert!(interpreter.globals().is_defined("Z"));
}

#[test]
fn deep_recursion_below_the_limit_succeeds() {
    let numbers = (1..=1000).map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
    assert_eq!(eval(&format!("VECSUM([{numbers}])")), "500500");
}

#[test]
fn vectors() {
    assert_eq!(eval("VECCONCAT(VECTAIL([1, 2, 3]), [9])"), "[2, 3, 9]");
    assert_eq!(eval("VECHEAD([4, 5])"), "4");
    assert_eq!(eval("VECLEN([1, [2, 3]])"), "2");
    assert_eq!(eval("VECEMPTY([])"), "true");
    assert_eq!(eval(r#"["A", TRUE, 1.5]"#), "[A, true, 1.5]");
    assert_eq!(error_of("VECHEAD([])"), "Empty vector passed to VECHEAD");
}

#[test]
fn conversions() {
    assert_eq!(eval(r#"NUM("42") + 1"#), "43");
    assert_eq!(eval(r#"NUM("")"#), "0");
    assert_eq!(eval(r#"NUM("ABC")"#), "NaN");
    assert_eq!(eval("NUM(TRUE)"), "1");
    assert_eq!(eval("STR(1 / 3)"), "0.3333333333");
    assert_eq!(eval("STR(TRUE)"), "TRUE");
    assert_eq!(eval(r#"STR("abc")"#), "ABC");
    assert_eq!(eval("TYPE(1)"), "NUM");
    assert_eq!(eval("TYPE([])"), "VEC");
}

#[test]
fn assertions_carry_their_message() {
    assert_eq!(eval("ASSERT(TRUE)"), "true");
    assert_eq!(error_of(r#"ASSERT(1 > 2, "ONE IS SMALL")"#), "ONE IS SMALL");
    assert_failure("ASSERT(1)");
}

#[test]
fn standard_library() {
    assert_eq!(eval("SQRT(16)"), "4");
    assert_eq!(eval("ABS(-2)"), "2");
    assert_eq!(eval("SIGN(-3) + SIGN(0) + SIGN(8)"), "0");
    assert_eq!(eval("MIN(3, 4) + MAX(3, 4)"), "7");
    assert_eq!(eval("ROUND(2.5)"), "3");
    assert_eq!(eval("LOG10(1000)"), "3");
    assert_eq!(eval("LOG2(8)"), "3");
    assert_eq!(eval("DEG(PI)"), "180");
    assert_eq!(eval("STR(RAD(180)) == STR(PI)"), "true");
    assert_eq!(eval("ISNUM(1) && ISSTR(\"S\") && ISBOOL(FALSE) && ISVEC([]) && ISREF($A)"),
               "true");
    assert_eq!(eval("ISFN(SIN) && !ISFN(1)"), "true");
    assert_eq!(eval("DOUBLE(X) = X * 2; VECMAP(DOUBLE, [1, 2, 3])"), "[2, 4, 6]");
    assert_eq!(eval("VECSUM([1, 2, 3, 4])"), "10");
    assert_eq!(eval("VECREV([1, 2, 3])"), "[3, 2, 1]");
    assert_eq!(eval("VECNTH([5, 6, 7], 1)"), "6");
    assert_eq!(eval("ISFROZEN($VECSUM) && ISFROZEN($PI)"), "true");
}

#[test]
fn the_prelude_can_be_skipped() {
    use abacus::interpreter::{evaluator::core::InterpreterConfig, import::MemoryLoader};

    let config = InterpreterConfig { load_prelude: false,
                                     loader:       Box::new(MemoryLoader::default()), };
    let mut interpreter = config.build().unwrap();

    assert!(interpreter.run("PI").has_error);
    assert!(!interpreter.run("SIN(0)").has_error);
    assert!(!interpreter.run("IMPORT \"MATHLIB/BOOTSTRAP.MATH\"; PI").has_error);
}

#[test]
fn definitions_persist_between_runs() {
    let mut interpreter = Interpreter::new().unwrap();
    assert!(!interpreter.run("CUBE(X) = X ^ 3").has_error);
    assert_eq!(interpreter.run("CUBE(3)").last_value(), Some(&Value::Number(27.0)));
}

#[test]
fn a_runtime_error_halts_the_run_but_keeps_earlier_effects() {
    let mut interpreter = Interpreter::new().unwrap();
    let result = interpreter.run("X = 1; Y = Z; X = 5");

    assert!(result.has_error);
    assert!(matches!(result.entries.as_slice(),
                     [ResultEntry::Statement(_),
                      ResultEntry::Value(Value::Number(1.0)),
                      ResultEntry::Statement(_),
                      ResultEntry::Error(_)]));
    assert_eq!(interpreter.run("X").last_value(), Some(&Value::Number(1.0)));
}

#[test]
fn a_failed_call_does_not_leak_its_scope() {
    let mut interpreter = Interpreter::new().unwrap();
    assert!(interpreter.run("F(X) = X + NOPE; F(1)").has_error);

    let result = interpreter.run("X");
    assert_eq!(describe_errors(&result), "Undefined name X");
}

#[test]
fn pragma_entries_precede_their_statement() {
    let result = run("#[OUTPUT(AST=FALSE, RESULT=TRUE)]\n1");

    assert!(!result.has_error);
    match result.entries.as_slice() {
        [ResultEntry::Pragma(pragma),
         ResultEntry::Statement(_),
         ResultEntry::Statement(_),
         ResultEntry::Value(Value::Number(1.0))] => {
            assert_eq!(pragma.name, "OUTPUT");
            assert_eq!(pragma.flag("AST"), Some(false));
            assert_eq!(pragma.flag("RESULT"), Some(true));
        },
        entries => panic!("unexpected entries {entries:?}"),
    }
}

#[test]
fn duplicate_pragma_attributes_are_rejected() {
    assert_eq!(error_of("#[OUTPUT(AST=TRUE, AST=FALSE)]"),
               "Interpreter error: Invalid pragma: attribute AST given twice in OUTPUT");
}

#[test]
fn a_parse_error_keeps_the_statements_before_it() {
    let mut interpreter = Interpreter::new().unwrap();
    let result = interpreter.run("X = 1; Y = 2 +");

    assert!(result.has_error);
    let statements = result.entries
                           .iter()
                           .filter(|e| matches!(e, ResultEntry::Statement(_)))
                           .count();
    assert_eq!(statements, 1);
    assert_eq!(result.values().count(), 0);
    assert!(describe_errors(&result).starts_with("Parser error @ <INLINE>:1:"));
    assert!(interpreter.run("X").has_error, "nothing runs after a parse error");
}

#[test]
fn lex_errors_report_their_position() {
    let result = run("1 +\n  2 @ 3");
    assert_eq!(describe_errors(&result),
               "Tokenizer error @ <INLINE>:2:5: Unexpected character '@'");
    assert_eq!(describe_errors(&run(r#"X = "open"#)),
               "Tokenizer error @ <INLINE>:1:5: Unterminated string");
}

#[test]
fn comments_and_newlines() {
    assert_eq!(eval("# a comment\nX = 2 # trailing\nX * 3"), "6");
    assert_eq!(eval("X = 1\n-2"), "-1");
}
