use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            function::meta,
        },
        value::{
            callable::{Callable, Clause, NativeBody, NativeFunction, UserFunction},
            core::Value,
        },
    },
};

impl Interpreter {
    /// Evaluates a function call.
    ///
    /// The callee is evaluated first and must be callable. The argument count
    /// is checked against its arity before any argument is evaluated; the
    /// arguments are then evaluated left to right.
    ///
    /// # Errors
    /// `TypeMismatch` if the callee is not callable, `Arity` on a wrong
    /// argument count, or whatever the callee raises.
    pub(crate) fn eval_call(&mut self, callee: &Expr, arguments: &[Expr]) -> EvalResult<Value> {
        let callable = Rc::clone(self.evaluate(callee)?.as_callable()?);
        let name = match (callee, callable.as_ref()) {
            (Expr::Variable { name, .. }, _) => name.clone(),
            (_, Callable::Native(native)) => native.name.to_string(),
            (_, Callable::User(_)) => callable.to_string(),
        };

        check_arity(&name, &callable, arguments.len())?;

        let values = arguments.iter()
                              .map(|argument| self.evaluate(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        self.call(&name, &callable, &values)
    }

    /// Invokes a callable with already evaluated arguments.
    ///
    /// # Errors
    /// `Arity` if the argument count is outside the callable's arity, or
    /// whatever the callee raises.
    pub fn call(&mut self, name: &str, callable: &Callable, arguments: &[Value]) -> EvalResult<Value> {
        check_arity(name, callable, arguments.len())?;
        trace!(name, arguments = arguments.len(), "calling");
        match callable {
            Callable::Native(native) => self.call_native(native, arguments),
            Callable::User(function) => self.call_user(name, function, arguments),
        }
    }

    fn call_native(&self, native: &NativeFunction, arguments: &[Value]) -> EvalResult<Value> {
        match native.body {
            NativeBody::Numeric(f) => {
                let numbers = arguments.iter()
                                       .map(Value::as_number)
                                       .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Number(f(&numbers)))
            },
            NativeBody::Raw(f) => f(arguments),
            NativeBody::WithEnv(f) => f(&self.environment(), arguments),
        }
    }

    /// Tries the clauses of `function` in declaration order.
    ///
    /// Each clause gets a fresh frame enclosed by its own closure holding its
    /// parameters. The first clause whose guard holds (or that has none)
    /// produces the result. When no clause matches, the call fails the same
    /// way `ASSERT(FALSE)` does.
    fn call_user(&mut self,
                 name: &str,
                 function: &UserFunction,
                 arguments: &[Value])
                 -> EvalResult<Value> {
        for clause in function.clauses() {
            let frame = Environment::child(&clause.closure);
            bind_parameters(&frame, name, clause, arguments)?;

            let outcome = self.with_environment(frame, |this| {
                                  if let Some(guard) = &clause.guard
                                     && !this.evaluate(guard)?.as_bool()?
                                  {
                                      return Ok(None);
                                  }
                                  this.evaluate(&clause.body).map(Some)
                              })?;

            if let Some(value) = outcome {
                return Ok(value);
            }
        }

        trace!(name, "no clause matched");
        meta::assert_fn(&[Value::Boolean(false)])
    }
}

fn check_arity(name: &str, callable: &Callable, found: usize) -> EvalResult<()> {
    let arity = callable.arity();
    if arity.accepts(found) {
        return Ok(());
    }
    Err(RuntimeError::Arity { name: name.to_string(),
                              min: arity.min,
                              max: arity.max,
                              found })
}

/// Binds call arguments to a clause's parameter names.
///
/// A destructured clause takes a single vector whose length must match its
/// parameter list. Otherwise arguments are bound positionally; parameters
/// beyond the supplied arguments stay unbound.
fn bind_parameters(frame: &Environment,
                   name: &str,
                   clause: &Clause,
                   arguments: &[Value])
                   -> EvalResult<()> {
    if clause.destructured {
        let [argument] = arguments else {
            return Err(RuntimeError::Arity { name:  name.to_string(),
                                             min:   1,
                                             max:   1,
                                             found: arguments.len(), });
        };
        let elements = argument.as_vector()?;
        if elements.len() != clause.params.len() {
            return Err(RuntimeError::Arity { name:  name.to_string(),
                                             min:   clause.params.len(),
                                             max:   clause.params.len(),
                                             found: elements.len(), });
        }
        return bind_all(frame, &clause.params, elements);
    }

    bind_all(frame, &clause.params, arguments)
}

fn bind_all(frame: &Environment, params: &[String], values: &[Value]) -> EvalResult<()> {
    for (param, value) in params.iter().zip(values) {
        frame.define(param, value.clone())?;
    }
    Ok(())
}
