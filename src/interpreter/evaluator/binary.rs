use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates both operands, left first, and applies `op`.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expr,
                              op: BinaryOperator,
                              right: &Expr)
                              -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        apply_binary(op, &left, &right)
    }

    /// Evaluates `&&` and `||`.
    ///
    /// Both operands must be booleans. The right operand is only evaluated
    /// when the left one does not decide the result.
    pub(crate) fn eval_logical(&mut self,
                               left: &Expr,
                               op: LogicalOperator,
                               right: &Expr)
                               -> EvalResult<Value> {
        let left = self.evaluate(left)?.as_bool()?;
        let result = match op {
            LogicalOperator::And => left && self.evaluate(right)?.as_bool()?,
            LogicalOperator::Or => left || self.evaluate(right)?.as_bool()?,
        };
        Ok(Value::Boolean(result))
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// Arithmetic and comparisons require numbers and follow IEEE-754: division
/// by zero yields an infinity or `NaN`. `\` is floor division and `%` keeps
/// the sign of the dividend. `==` and `!=` first require both operands to
/// have the same type.
///
/// # Example
/// ```
/// use abacus::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let r = apply_binary(BinaryOperator::IntDiv, &Value::Number(-7.0), &Value::Number(2.0));
/// assert_eq!(r.unwrap(), Value::Number(-4.0));
///
/// let r = apply_binary(BinaryOperator::Mod, &Value::Number(-7.0), &Value::Number(2.0));
/// assert_eq!(r.unwrap(), Value::Number(-1.0));
///
/// assert!(apply_binary(BinaryOperator::Equal, &Value::Number(1.0), &Value::from("1")).is_err());
/// ```
///
/// # Errors
/// `TypeMismatch` when an operand has the wrong type.
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul, NotEqual, Pow,
        Sub,
    };

    match op {
        Equal | NotEqual => {
            left.assert_same_tag(right)?;
            let equal = left == right;
            Ok(Value::Boolean(if op == Equal { equal } else { !equal }))
        },
        Less | Greater | LessEqual | GreaterEqual => {
            let (a, b) = (left.as_number()?, right.as_number()?);
            let result = match op {
                Less => a < b,
                Greater => a > b,
                LessEqual => a <= b,
                _ => a >= b,
            };
            Ok(Value::Boolean(result))
        },
        Add | Sub | Mul | Div | IntDiv | Mod | Pow => {
            let (a, b) = (left.as_number()?, right.as_number()?);
            let result = match op {
                Add => a + b,
                Sub => a - b,
                Mul => a * b,
                Div => a / b,
                IntDiv => (a / b).floor(),
                Mod => a % b,
                _ => a.powf(b),
            };
            Ok(Value::Number(result))
        },
    }
}
