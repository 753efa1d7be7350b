use crate::{
    ast::BinaryOperator,
    context::core::VariableContext,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::type_mismatch, core::EvalResult},
        value::core::Value,
    },
    util::num::i64_to_f32,
};

impl VariableContext<'_> {
    /// Evaluates an arithmetic operation.
    ///
    /// - Two integers produce an integer. Addition, subtraction, and
    ///   multiplication wrap on overflow; division truncates toward zero.
    /// - Any mix of integer and float produces a float.
    /// - `+` with a string on either side concatenates the rendered values.
    ///
    /// The operator must be one of `Add`, `Sub`, `Mul`, `Div` or `Mod`; other
    /// operators are not processed here.
    ///
    /// # Errors
    /// - `RuntimeError::DivisionByZero` for integer `/` or `%` by zero.
    /// - `RuntimeError::TypeMismatch` for any other pair of kinds.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     ast::BinaryOperator,
    ///     context::core::VariableContext,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let result = VariableContext::eval_arithmetic(BinaryOperator::Mod,
    ///                                               &Value::Float(10.0),
    ///                                               &Value::Integer(3)).unwrap();
    /// assert_eq!(result, Value::Float(1.0));
    ///
    /// let joined = VariableContext::eval_arithmetic(BinaryOperator::Add,
    ///                                               &Value::Integer(1),
    ///                                               &Value::from("st")).unwrap();
    /// assert_eq!(joined, Value::from("1st"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use Value::{Float, Integer, Str};

        let result = match (left, right) {
            (Integer(a), Integer(b)) => integer_arithmetic(op, *a, *b).map(|r| r.map(Integer)),
            (Integer(a), Float(b)) => float_arithmetic(op, i64_to_f32(*a), *b).map(|x| Ok(Float(x))),
            (Float(a), Integer(b)) => float_arithmetic(op, *a, i64_to_f32(*b)).map(|x| Ok(Float(x))),
            (Float(a), Float(b)) => float_arithmetic(op, *a, *b).map(|x| Ok(Float(x))),
            (Str(_), _) | (_, Str(_)) if op == BinaryOperator::Add => {
                Some(Ok(Str(format!("{left}{right}"))))
            },
            _ => None,
        };

        result.unwrap_or_else(|| Err(type_mismatch(op, left, right)))
    }
}

/// `None` for operators outside the arithmetic family.
fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64) -> Option<EvalResult<i64>> {
    use BinaryOperator::{Add, Div, Mod, Mul, Sub};

    Some(match op {
        Add => Ok(a.wrapping_add(b)),
        Sub => Ok(a.wrapping_sub(b)),
        Mul => Ok(a.wrapping_mul(b)),
        Div | Mod if b == 0 => Err(RuntimeError::DivisionByZero),
        Div => Ok(a.wrapping_div(b)),
        Mod => Ok(a.wrapping_rem(b)),
        _ => return None,
    })
}

fn float_arithmetic(op: BinaryOperator, a: f32, b: f32) -> Option<f32> {
    use BinaryOperator::{Add, Div, Mod, Mul, Sub};

    Some(match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => a / b,
        Mod => a % b,
        _ => return None,
    })
}
