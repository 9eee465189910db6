use std::{collections::HashSet, fmt, rc::Rc};

use tracing::{debug, warn};

use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::function::builtin::install_builtins,
        import::{BOOTSTRAP_PATH, FsLoader, SourceLoader, load_module},
        lexer::Scanner,
        parser::parse,
        result::{InterpreterResult, Pragma, ResultEntry, StatementOutcome},
        value::{
            callable::{Callable, UserFunction},
            core::{ErrorValue, Value},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Path reported in diagnostics for source that did not come from a module.
pub const INLINE_PATH: &str = "<INLINE>";

/// Deepest nesting of calls and `WITH` blocks a run may reach before it is
/// halted.
pub const MAX_CALL_DEPTH: usize = 5_000;

/// Remaining stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each extra stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Settings for building an [`Interpreter`].
pub struct InterpreterConfig {
    /// Whether to run the bundled standard library before returning.
    pub load_prelude: bool,
    /// Where `IMPORT` finds modules outside the bundled `MATHLIB/` ones.
    pub loader:       Box<dyn SourceLoader>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { load_prelude: true,
               loader:       Box::new(FsLoader::new(".")), }
    }
}

impl fmt::Debug for InterpreterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterConfig")
         .field("load_prelude", &self.load_prelude)
         .finish_non_exhaustive()
    }
}

impl InterpreterConfig {
    /// Creates the interpreter, installing the builtins and, if requested,
    /// running the standard library.
    ///
    /// # Errors
    /// `Bootstrap` if the standard library reports an error.
    pub fn build(self) -> EvalResult<Interpreter> {
        let mut interpreter = Interpreter::with_loader(self.loader)?;
        if self.load_prelude {
            interpreter.bootstrap()?;
        }
        Ok(interpreter)
    }
}

/// Stores the runtime state of one interpreter instance.
///
/// An interpreter owns its root scope (holding the builtins as constants),
/// the stack of scopes pushed by calls and `WITH` blocks, and the set of
/// modules it has imported. Separate instances share nothing.
///
/// ## Usage
///
/// `Interpreter` is created once and fed source text through [`run`]; every
/// definition made by one run is visible to the next.
///
/// ```
/// use abacus::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new().unwrap();
/// interpreter.run("SQUARE(X) = X * X");
/// let result = interpreter.run("SQUARE(4)");
///
/// assert!(!result.has_error);
/// assert_eq!(result.last_value(), Some(&Value::Number(16.0)));
/// ```
///
/// [`run`]: Interpreter::run
pub struct Interpreter {
    root:              Rc<Environment>,
    pub(crate) scopes: Vec<Rc<Environment>>,
    imported:          HashSet<String>,
    loader:            Box<dyn SourceLoader>,
}

impl Interpreter {
    /// Creates an interpreter with the builtins and the standard library,
    /// importing further modules from the working directory.
    ///
    /// # Errors
    /// `Bootstrap` if the standard library reports an error.
    pub fn new() -> EvalResult<Self> {
        InterpreterConfig::default().build()
    }

    /// Creates an interpreter with the builtins only.
    ///
    /// # Errors
    /// `Redefinition` if a builtin could not be installed.
    pub fn with_loader(loader: Box<dyn SourceLoader>) -> EvalResult<Self> {
        let root = Environment::root();
        install_builtins(&root)?;

        Ok(Self { root,
                  scopes: Vec::new(),
                  imported: HashSet::new(),
                  loader })
    }

    /// Runs the bundled standard library once.
    ///
    /// # Errors
    /// `Bootstrap` carrying the first error the library reported.
    pub fn bootstrap(&mut self) -> EvalResult<()> {
        let result = self.run(&format!("IMPORT \"{BOOTSTRAP_PATH}\""));
        match result.errors().next() {
            Some(error) => Err(RuntimeError::Bootstrap { message: error.to_string() }),
            None => Ok(()),
        }
    }

    /// The scope statements currently execute in.
    #[must_use]
    pub fn environment(&self) -> Rc<Environment> {
        Rc::clone(self.scopes.last().unwrap_or(&self.root))
    }

    /// The outermost scope, holding builtins and top-level definitions.
    #[must_use]
    pub const fn globals(&self) -> &Rc<Environment> {
        &self.root
    }

    /// Runs source text that did not come from a module.
    pub fn run(&mut self, source: &str) -> InterpreterResult {
        self.run_with_path(source, INLINE_PATH)
    }

    /// Scans, parses and executes `source`, reporting diagnostics against
    /// `path`.
    ///
    /// Lexical errors stop the run before parsing and parse errors before
    /// execution. The first statement that fails ends the run; the ones
    /// before it keep their effects.
    pub fn run_with_path(&mut self, source: &str, path: &str) -> InterpreterResult {
        let mut result = InterpreterResult::default();

        let tokens = Scanner::new(source).scan_tokens(|e| {
                                             result.push_error(ErrorValue::new(format!("Tokenizer error @ {path}:{}:{}: {e}",
                                                                                       e.line, e.column)));
                                         });
        if result.has_error {
            return result;
        }

        let statements = parse(&tokens, |e| {
            result.push_error(ErrorValue::new(format!("Parser error @ {path}:{}:{}: {e}",
                                                      e.line, e.column)));
        });
        if result.has_error {
            result.entries.extend(statements.into_iter().map(ResultEntry::Statement));
            return result;
        }

        for statement in statements {
            debug!(path, line = statement.line_number(), "executing statement");
            match self.execute(&statement) {
                Ok(StatementOutcome::Value(value)) => {
                    result.entries.push(ResultEntry::Statement(statement));
                    result.entries.push(ResultEntry::Value(value));
                },
                Ok(StatementOutcome::Nested(child)) => {
                    result.entries.push(ResultEntry::Statement(statement));
                    result.extend(child);
                    if result.has_error {
                        break;
                    }
                },
                Ok(StatementOutcome::Pragma(pragma)) => {
                    result.entries.push(ResultEntry::Pragma(pragma));
                    result.entries.push(ResultEntry::Statement(statement));
                },
                Err(e) => {
                    warn!(path, line = statement.line_number(), error = %e, "run halted");
                    result.entries.push(ResultEntry::Statement(statement));
                    result.push_error(e.into());
                    break;
                },
            }
        }

        result
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating it.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<StatementOutcome> {
        match statement {
            Stmt::Expression { expr, .. } => self.evaluate(expr).map(StatementOutcome::Value),
            Stmt::Import { path, .. } => self.import(path),
            Stmt::Pragma { name, attributes, .. } => {
                for (i, (key, _)) in attributes.iter().enumerate() {
                    if attributes[..i].iter().any(|(previous, _)| previous == key) {
                        return Err(RuntimeError::InvalidPragma { details: format!("attribute {key} given twice in {name}") });
                    }
                }
                Ok(StatementOutcome::Pragma(Pragma { name:       name.clone(),
                                                     attributes: attributes.clone(), }))
            },
        }
    }

    /// Runs a module in the current scope, at most once per interpreter.
    fn import(&mut self, path: &str) -> EvalResult<StatementOutcome> {
        if self.imported.contains(path) {
            debug!(path, "module already imported");
            return Ok(StatementOutcome::Nested(InterpreterResult::default()));
        }

        let source = load_module(self.loader.as_ref(), path).map_err(|source| {
                                                              RuntimeError::Import { path: path.to_string(),
                                                                                     source }
                                                          })?;
        self.imported.insert(path.to_string());
        debug!(path, "importing module");

        Ok(StatementOutcome::Nested(self.run_with_path(&source, path)))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    ///
    /// # Errors
    /// Any runtime error raised by the expression or its sub-expressions.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.evaluate_inner(expr))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Assign { name,
                           value,
                           is_const,
                           .. } => self.eval_assign(name, value, *is_const),
            Expr::Binary { left, op, right, .. } => self.eval_binary(left, *op, right),
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.evaluate(condition)?.as_bool()? {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            },
            Expr::Call { callee, arguments, .. } => self.eval_call(callee, arguments),
            Expr::Function(function) => {
                let function = UserFunction::new(function, self.environment());
                Ok(Value::from(Callable::User(function)))
            },
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Reference { name, .. } => Ok(Value::Reference(name.clone())),
            Expr::Unary { op, expr, .. } => self.eval_unary(*op, expr),
            Expr::Variable { name, .. } => self.environment().get(name),
            Expr::Vector { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.evaluate(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::With { locals, body, .. } => self.eval_with(locals, body),
        }
    }
}
