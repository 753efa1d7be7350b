use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::unsupported},
        value::core::Value,
    },
    util::num::{f32_to_i64_checked, i64_to_f32, parse_integer_text},
};

/// Absolute value of an integer or float.
///
/// Integer `i64::MIN` wraps to itself.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::convert::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-5)]).unwrap(), Value::Integer(5));
/// assert_eq!(abs(&[Value::Float(-2.5)]).unwrap(), Value::Float(2.5));
/// assert!(abs(&[Value::from("x")]).is_err());
/// ```
pub fn abs(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(n.wrapping_abs())),
        [Value::Float(x)] => Ok(Value::Float(x.abs())),
        _ => Err(unsupported("abs", args)),
    }
}

/// Rounds a float half away from zero and returns an integer.
///
/// Negative halves move away from zero too: `-2.5` becomes `-3`, where a
/// round-half-up rule such as Java's `Math.round` gives `-2`. Integers are
/// returned unchanged.
///
/// # Errors
/// `RuntimeError::InvalidArgument` if the float is `NaN`, infinite, or out of
/// the integer range.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::convert::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Float(2.5)]).unwrap(), Value::Integer(3));
/// assert_eq!(round(&[Value::Float(-2.5)]).unwrap(), Value::Integer(-3));
/// assert_eq!(round(&[Value::Integer(7)]).unwrap(), Value::Integer(7));
/// ```
pub fn round(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(*n)),
        [Value::Float(x)] => Ok(Value::Integer(f32_to_i64_checked(x.round(), "round")?)),
        _ => Err(unsupported("round", args)),
    }
}

/// Parses a string as a decimal or `0x` hexadecimal integer.
///
/// Surrounding whitespace is ignored. Integers are returned unchanged.
///
/// # Errors
/// `RuntimeError::InvalidArgument` if the string is not an integer.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::convert::str2int, value::core::Value};
///
/// assert_eq!(str2int(&[Value::from(" 0xFF ")]).unwrap(), Value::Integer(255));
/// assert!(str2int(&[Value::from("x")]).is_err());
/// ```
pub fn str2int(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(*n)),
        [Value::Str(s)] => parse_integer_text(s.trim()).map(Value::Integer)
                                                       .ok_or_else(|| invalid("str2int", s, "an integer")),
        _ => Err(unsupported("str2int", args)),
    }
}

/// Parses a string as a float.
///
/// Integers are promoted and floats returned unchanged.
///
/// # Errors
/// `RuntimeError::InvalidArgument` if the string is not a float.
pub fn str2float(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Float(x)] => Ok(Value::Float(*x)),
        [Value::Integer(n)] => Ok(Value::Float(i64_to_f32(*n))),
        [Value::Str(s)] => s.trim()
                            .parse::<f32>()
                            .map(Value::Float)
                            .map_err(|_| invalid("str2float", s, "a float")),
        _ => Err(unsupported("str2float", args)),
    }
}

/// Parses `"true"` or `"false"`, in any letter case, as a boolean.
///
/// # Errors
/// `RuntimeError::InvalidArgument` for any other string.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::convert::str2bool, value::core::Value};
///
/// assert_eq!(str2bool(&[Value::from("TRUE")]).unwrap(), Value::Bool(true));
/// assert!(str2bool(&[Value::from("yes")]).is_err());
/// ```
pub fn str2bool(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Bool(b)] => Ok(Value::Bool(*b)),
        [Value::Str(s)] if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        [Value::Str(s)] if s.trim().eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        [Value::Str(s)] => Err(invalid("str2bool", s, "a boolean")),
        _ => Err(unsupported("str2bool", args)),
    }
}

/// Renders any value as it would appear in substituted text.
pub fn tostr(args: &[Value]) -> EvalResult<Value> {
    match args {
        [value] => Ok(Value::Str(value.to_string())),
        _ => Err(unsupported("tostr", args)),
    }
}

fn invalid(function: &str, text: &str, expected: &str) -> RuntimeError {
    RuntimeError::InvalidArgument { function: function.to_string(),
                                    details:  format!("'{text}' is not {expected}"), }
}
