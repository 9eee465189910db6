/// Lexically scoped variable frames.
///
/// Each frame holds mutable and constant bindings and points to the frame
/// that encloses it. Lookups walk outwards; definitions, freezes and
/// deletions only ever touch the frame they are made on.
pub mod environment;
/// The evaluator module executes statements and computes results.
///
/// The evaluator walks the AST, applies operators, dispatches calls to
/// builtins and user functions, and turns every statement into entries of
/// the result stream. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression kind with left-to-right operand order.
/// - Manages the scope stack for calls and `WITH` blocks.
/// - Converts runtime errors into error entries and halts the run.
pub mod evaluator;
/// Module retrieval for `IMPORT`.
///
/// Defines the `SourceLoader` seam, a filesystem loader and an in-memory
/// one, and serves the bundled standard library.
pub mod import;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Skips whitespace, newlines and comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// statements and expressions by recursive descent. The first error stops
/// parsing of the remaining input.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Recognises function headers, guards, imports and pragmas.
pub mod parser;
/// The ordered output of a run: echoed statements, values, errors and
/// pragma directives.
pub mod result;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the tagged `Value` union, its typed extractors and
/// display rules, and the callables: native builtins and multi-clause user
/// functions.
pub mod value;
