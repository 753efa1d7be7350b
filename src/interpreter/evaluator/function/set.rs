use crate::{
    interpreter::{
        evaluator::{core::EvalResult, function::core::unsupported},
        value::{core::Value, set_value::SetValue},
    },
    util::num::usize_to_i64,
};

/// Builds a set from its arguments, dropping later duplicates.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::set::set, value::core::Value};
///
/// let s = set(&[Value::from("a"), Value::from(1), Value::from("a")]).unwrap();
/// assert_eq!(s.to_string(), "{\"a\", 1}");
/// assert_eq!(set(&[]).unwrap(), Value::Set(Vec::new()));
/// ```
#[allow(clippy::unnecessary_wraps)]
pub fn set(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::set_of(args.iter().cloned()))
}

/// Number of members in a set.
pub fn size(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Set(members)] => Ok(Value::Integer(usize_to_i64(members.len()))),
        _ => Err(unsupported("size", args)),
    }
}

/// Tests whether the set given first holds the second argument.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::set::{contains, set}, value::core::Value};
///
/// let s = set(&[Value::from(1), Value::from(2)]).unwrap();
/// assert_eq!(contains(&[s.clone(), Value::from(2)]).unwrap(), Value::Bool(true));
/// assert_eq!(contains(&[s, Value::Float(2.0)]).unwrap(), Value::Bool(false));
/// ```
pub fn contains(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Set(members), value] => Ok(Value::Bool(members.contains(&SetValue::from(value)))),
        _ => Err(unsupported("contains", args)),
    }
}

/// Members of the first set followed by the new members of the second.
pub fn union(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Set(left), Value::Set(right)] => Ok(Value::Set(SetValue::union(left, right))),
        _ => Err(unsupported("union", args)),
    }
}

/// Members of the first set that also occur in the second.
pub fn intersect(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Set(left), Value::Set(right)] => Ok(Value::Set(SetValue::intersect(left, right))),
        _ => Err(unsupported("intersect", args)),
    }
}

/// Members of the first set that do not occur in the second.
pub fn diff(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Set(left), Value::Set(right)] => Ok(Value::Set(SetValue::diff(left, right))),
        _ => Err(unsupported("diff", args)),
    }
}
