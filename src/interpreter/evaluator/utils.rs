use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Binding, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter, MAX_CALL_DEPTH},
        value::{callable::Callable, core::Value},
    },
};

impl Interpreter {
    /// Evaluates `f` with `frame` pushed as the current scope.
    ///
    /// The frame is popped again whether `f` succeeds or fails, so a failed
    /// call never leaves its scope behind for the next statement.
    ///
    /// # Errors
    /// `CallDepth` if [`MAX_CALL_DEPTH`] frames are already pushed.
    pub(crate) fn with_environment<T>(&mut self,
                                      frame: Rc<Environment>,
                                      f: impl FnOnce(&mut Self) -> EvalResult<T>)
                                      -> EvalResult<T> {
        if self.scopes.len() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepth { limit: MAX_CALL_DEPTH });
        }

        self.scopes.push(frame);
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Evaluates an assignment or declaration and binds the result in the
    /// current scope.
    ///
    /// When a function literal is bound to a name whose nearest binding is a
    /// non-constant user function, the new clause is appended to a copy of
    /// that function and the copy is bound instead. Appending to a native
    /// function is refused.
    ///
    /// # Returns
    /// The value that was bound.
    pub(crate) fn eval_assign(&mut self,
                              name: &str,
                              value_expr: &Expr,
                              is_const: bool)
                              -> EvalResult<Value> {
        let env = self.environment();
        let mut value = self.evaluate(value_expr)?;

        if matches!(value_expr, Expr::Function(_))
           && env.is_defined(name)
           && !env.is_constant(name)
           && let Value::Callable(existing) = env.get(name)?
           && let Value::Callable(declared) = &value
        {
            let extended = match (existing.as_ref(), declared.as_ref()) {
                (Callable::Native(_), _) => {
                    return Err(RuntimeError::NativeExtension { name: name.to_string() });
                },
                (Callable::User(existing), Callable::User(declared)) => {
                    Some(existing.extended_with(declared, name)?)
                },
                (Callable::User(_), Callable::Native(_)) => None,
            };
            if let Some(extended) = extended {
                value = Value::from(Callable::User(extended));
            }
        }

        if is_const {
            env.define_constant(name, value.clone())?;
        } else {
            env.define(name, value.clone())?;
        }
        debug!(name, is_const, "bound name");
        Ok(value)
    }

    /// Evaluates a `WITH` block.
    ///
    /// The locals are bound one after another in a fresh scope, so each
    /// value can use the locals before it; the body is evaluated in the same
    /// scope. A local always shadows an outer binding of the same name, even
    /// a function, and never adds clauses to it.
    pub(crate) fn eval_with(&mut self, locals: &[Binding], body: &Expr) -> EvalResult<Value> {
        let frame = Environment::child(&self.environment());
        self.with_environment(Rc::clone(&frame), |this| {
                for local in locals {
                    let value = this.evaluate(&local.value)?;
                    frame.define(&local.name, value)?;
                }
                this.evaluate(body)
            })
    }
}
