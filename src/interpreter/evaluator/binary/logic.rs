use crate::{
    ast::BinaryOperator,
    context::core::VariableContext,
    interpreter::{
        evaluator::{binary::core::type_mismatch, core::EvalResult},
        value::core::Value,
    },
};

impl VariableContext<'_> {
    /// Evaluates a logic operator.
    ///
    /// On two booleans `&&`, `||`, and `^` are logical and, or, and exclusive
    /// or. On two integers they are the bitwise equivalents. Both operands
    /// have already been evaluated; there is no short-circuiting.
    ///
    /// # Errors
    /// `RuntimeError::TypeMismatch` for any other pair of kinds.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     ast::BinaryOperator,
    ///     context::core::VariableContext,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let bits = VariableContext::eval_logic(BinaryOperator::Xor,
    ///                                        &Value::Integer(0b1100),
    ///                                        &Value::Integer(0b1010));
    /// assert_eq!(bits.unwrap(), Value::Integer(0b0110));
    ///
    /// let both = VariableContext::eval_logic(BinaryOperator::And,
    ///                                        &Value::Bool(true),
    ///                                        &Value::Bool(false));
    /// assert_eq!(both.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{And, Or, Xor};
        use Value::{Bool, Integer};

        match (left, right) {
            (Bool(a), Bool(b)) => Ok(Bool(match op {
                                     And => *a && *b,
                                     Or => *a || *b,
                                     Xor => a ^ b,
                                     _ => return Err(type_mismatch(op, left, right)),
                                 })),
            (Integer(a), Integer(b)) => Ok(Integer(match op {
                                           And => a & b,
                                           Or => a | b,
                                           Xor => a ^ b,
                                           _ => return Err(type_mismatch(op, left, right)),
                                       })),
            _ => Err(type_mismatch(op, left, right)),
        }
    }
}
