use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    context::core::VariableContext,
    interpreter::{
        evaluator::{binary::core::type_mismatch, core::EvalResult},
        value::{core::Value, set_value::SetValue},
    },
    util::num::i64_to_f32,
};

impl VariableContext<'_> {
    /// Evaluates `==` or `!=`.
    ///
    /// Operands must have the same kind, except that an integer compared with
    /// a float is promoted to float. Sets are equal when they hold the same
    /// members, regardless of order.
    ///
    /// # Errors
    /// `RuntimeError::TypeMismatch` when the kinds cannot be compared.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     ast::BinaryOperator,
    ///     context::core::VariableContext,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let eq = VariableContext::eval_equality(BinaryOperator::Equal,
    ///                                         &Value::Integer(2),
    ///                                         &Value::Float(2.0));
    /// assert_eq!(eq.unwrap(), Value::Bool(true));
    ///
    /// let mixed = VariableContext::eval_equality(BinaryOperator::Equal,
    ///                                            &Value::Integer(1),
    ///                                            &Value::from("1"));
    /// assert!(mixed.is_err());
    /// ```
    pub fn eval_equality(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use Value::{Bool, Float, Integer, Set, Str};

        #[allow(clippy::float_cmp)]
        let equal = match (left, right) {
            (Integer(a), Integer(b)) => a == b,
            (Integer(a), Float(b)) => i64_to_f32(*a) == *b,
            (Float(a), Integer(b)) => *a == i64_to_f32(*b),
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Set(a), Set(b)) => SetValue::same_members(a, b),
            _ => return Err(type_mismatch(op, left, right)),
        };

        Ok(Bool(if op == BinaryOperator::Equal { equal } else { !equal }))
    }

    /// Evaluates `<`, `<=`, `>` or `>=`.
    ///
    /// Numbers compare numerically, with integer to float promotion; strings
    /// compare lexicographically. Any comparison involving `NaN` is `false`.
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
    /// let lt = VariableContext::eval_ordering(BinaryOperator::Less,
    ///                                         &Value::from("abc"),
    ///                                         &Value::from("abd"));
    /// assert_eq!(lt.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_ordering(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};
        use Value::{Float, Integer, Str};

        let ordering = match (left, right) {
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Integer(a), Float(b)) => i64_to_f32(*a).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&i64_to_f32(*b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Str(a), Str(b)) => Some(a.cmp(b)),
            _ => return Err(type_mismatch(op, left, right)),
        };

        let holds = match op {
            Less => ordering.is_some_and(Ordering::is_lt),
            LessEqual => ordering.is_some_and(Ordering::is_le),
            Greater => ordering.is_some_and(Ordering::is_gt),
            GreaterEqual => ordering.is_some_and(Ordering::is_ge),
            _ => return Err(type_mismatch(op, left, right)),
        };

        Ok(Value::Bool(holds))
    }
}
