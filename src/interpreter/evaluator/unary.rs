use crate::{
    ast::UnaryOperator,
    context::core::VariableContext,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

impl VariableContext<'_> {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// - `!` negates a boolean and takes the bitwise complement of an integer,
    ///   so `!10` is `-11`.
    /// - `-` negates integers (wrapping) and floats.
    /// - `+` returns integers and floats unchanged.
    ///
    /// # Errors
    /// `RuntimeError::UnaryTypeMismatch` for any other operand kind, including
    /// `!` on floats and strings.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     ast::UnaryOperator,
    ///     context::core::VariableContext,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// assert_eq!(VariableContext::eval_unary(UnaryOperator::Not, &Value::Integer(10)).unwrap(),
    ///            Value::Integer(-11));
    /// assert!(VariableContext::eval_unary(UnaryOperator::Not, &Value::Float(3.2)).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOperator::Not, Value::Integer(n)) => Ok(Value::Integer(!n)),
            (UnaryOperator::Negate, Value::Integer(n)) => Ok(Value::Integer(n.wrapping_neg())),
            (UnaryOperator::Negate, Value::Float(x)) => Ok(Value::Float(-x)),
            (UnaryOperator::Plus, Value::Integer(_) | Value::Float(_)) => Ok(value.clone()),
            _ => Err(RuntimeError::UnaryTypeMismatch { operator: op.to_string(),
                                                       kind:     value.kind(), }),
        }
    }
}
