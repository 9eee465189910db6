use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// - `-X` negates a number.
    /// - `!X` inverts a boolean.
    /// - `|X|` is the absolute value of a number.
    pub(crate) fn eval_unary(&mut self, op: UnaryOperator, expr: &Expr) -> EvalResult<Value> {
        let operand = self.evaluate(expr)?;
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-operand.as_number()?)),
            UnaryOperator::Not => Ok(Value::Boolean(!operand.as_bool()?)),
            UnaryOperator::Abs => Ok(Value::Number(operand.as_number()?.abs())),
        }
    }
}
