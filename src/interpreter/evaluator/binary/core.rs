use crate::{
    ast::BinaryOperator,
    context::core::VariableContext,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

impl VariableContext<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to a specialized handler depending
    /// on the operator. Arithmetic operators use `eval_arithmetic`, equality
    /// operators `eval_equality`, ordering operators `eval_ordering`, and the
    /// logic operators `eval_logic`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     ast::BinaryOperator,
    ///     context::core::VariableContext,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = VariableContext::eval_binary(BinaryOperator::Add, &left, &right);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub, Xor,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right),
            Equal | NotEqual => Self::eval_equality(op, left, right),
            Less | LessEqual | Greater | GreaterEqual => Self::eval_ordering(op, left, right),
            And | Or | Xor => Self::eval_logic(op, left, right),
        }
    }
}

/// Builds the error for an operator applied to an unsupported pair of kinds.
pub(crate) fn type_mismatch(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch { operator: op.to_string(),
                                 left:     left.kind(),
                                 right:    right.kind(), }
}
