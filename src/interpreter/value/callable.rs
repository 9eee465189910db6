use std::{fmt, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, FunctionExpr},
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
};

/// The inclusive range of argument counts a callable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Fewest arguments accepted.
    pub min: usize,
    /// Most arguments accepted.
    pub max: usize,
}

impl Arity {
    /// Exactly `n` arguments.
    #[must_use]
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` arguments, both included.
    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Tests whether the given argument count satisfies this arity.
    #[must_use]
    pub const fn accepts(&self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

/// Host function working on numbers only. Arguments are checked to be
/// numbers before it runs.
pub type NumericFn = fn(&[f64]) -> f64;
/// Host function working on arbitrary values.
pub type RawFn = fn(&[Value]) -> EvalResult<Value>;
/// Host function that also receives the caller's current scope.
pub type EnvFn = fn(&Rc<Environment>, &[Value]) -> EvalResult<Value>;

/// The three shapes a builtin body can take.
#[derive(Debug, Clone, Copy)]
pub enum NativeBody {
    Numeric(NumericFn),
    Raw(RawFn),
    WithEnv(EnvFn),
}

/// A builtin implemented by the host.
#[derive(Debug)]
pub struct NativeFunction {
    pub name:  &'static str,
    pub arity: Arity,
    pub body:  NativeBody,
}

/// One guarded alternative of a user-defined function.
///
/// A clause binds the call's arguments to its own parameter names in a fresh
/// frame enclosed by `closure`, evaluates `guard` there and, if it holds,
/// evaluates `body`. A clause without a guard always applies.
pub struct Clause {
    pub params:       Vec<String>,
    pub destructured: bool,
    pub guard:        Option<Expr>,
    pub body:         Expr,
    /// The scope the clause was declared in.
    pub closure:      Rc<Environment>,
}

impl Clause {
    /// Whether this clause accepts every call.
    #[must_use]
    pub const fn is_unconditional(&self) -> bool {
        self.guard.is_none()
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
         .field("params", &self.params)
         .field("destructured", &self.destructured)
         .field("guard", &self.guard)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}

/// A function written in the language: an ordered list of clauses tried
/// first to last.
///
/// The arity is fixed by the first declaration. Clauses added later are not
/// checked against it; extra parameters simply stay unbound.
#[derive(Debug, Clone)]
pub struct UserFunction {
    arity:   Arity,
    clauses: Vec<Rc<Clause>>,
}

impl UserFunction {
    /// Creates a single-clause function from a function literal evaluated in
    /// `closure`.
    ///
    /// A destructured parameter list takes exactly one (vector) argument.
    #[must_use]
    pub fn new(function: &FunctionExpr, closure: Rc<Environment>) -> Self {
        let arity = if function.destructured {
            Arity::exact(1)
        } else {
            Arity::exact(function.params.len())
        };
        let clause = Clause { params: function.params.clone(),
                              destructured: function.destructured,
                              guard: function.guard.as_deref().cloned(),
                              body: (*function.body).clone(),
                              closure };
        Self { arity,
               clauses: vec![Rc::new(clause)] }
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// The clauses in the order they are tried.
    #[must_use]
    pub fn clauses(&self) -> &[Rc<Clause>] {
        &self.clauses
    }

    /// Whether the last clause is unconditional, leaving no room for more.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.clauses.last().is_some_and(|clause| clause.is_unconditional())
    }

    /// Returns a copy of this function with the clauses of `other` appended.
    ///
    /// `self` is left untouched, so other bindings of the same function keep
    /// their clause list.
    ///
    /// # Errors
    /// `Redefinition` if this function already ends in an unconditional
    /// clause.
    pub fn extended_with(&self, other: &Self, name: &str) -> EvalResult<Self> {
        if self.is_closed() {
            return Err(RuntimeError::Redefinition { name:   name.to_string(),
                                                    reason: "a clause without a guard already \
                                                             matches every call", });
        }

        let mut clauses = self.clauses.clone();
        clauses.extend(other.clauses.iter().cloned());
        debug!(name, clauses = clauses.len(), "appended function clause");

        Ok(Self { arity: self.arity,
                  clauses })
    }
}

/// Anything that can be called.
#[derive(Debug)]
pub enum Callable {
    Native(NativeFunction),
    User(UserFunction),
}

impl Callable {
    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::Native(native) => native.arity,
            Self::User(function) => function.arity,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "<native {}>", native.name),
            Self::User(_) => write!(f, "<fn>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralValue;

    fn literal(n: f64) -> Expr {
        Expr::Literal { value: LiteralValue::Number(n),
                        line:  1, }
    }

    fn function(guard: Option<Expr>) -> FunctionExpr {
        FunctionExpr { params: vec!["X".to_string()],
                       destructured: false,
                       body: Box::new(literal(1.0)),
                       guard: guard.map(Box::new),
                       line: 1 }
    }

    #[test]
    fn arity_bounds_are_inclusive() {
        let arity = Arity::range(1, 2);
        assert!(!arity.accepts(0));
        assert!(arity.accepts(1));
        assert!(arity.accepts(2));
        assert!(!arity.accepts(3));
    }

    #[test]
    fn extending_copies_instead_of_mutating() {
        let env = Environment::root();
        let guarded = UserFunction::new(&function(Some(literal(0.0))), Rc::clone(&env));
        let fallback = UserFunction::new(&function(None), env);

        let extended = guarded.extended_with(&fallback, "F").unwrap();

        assert_eq!(guarded.clauses().len(), 1);
        assert_eq!(extended.clauses().len(), 2);
        assert!(extended.is_closed());
        assert!(extended.extended_with(&fallback, "F").is_err());
    }
}
