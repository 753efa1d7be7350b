use std::fmt::Write;

use crate::{
    interpreter::{
        evaluator::{core::EvalResult, function::core::unsupported},
        value::core::Value,
    },
    util::num::usize_to_i64,
};

/// Number of characters in a string.
pub fn strlen(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Str(s)] => Ok(Value::Integer(usize_to_i64(s.chars().count()))),
        _ => Err(unsupported("strlen", args)),
    }
}

/// Tests, ignoring case, whether the first string occurs in the second.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::string::issubstr, value::core::Value};
///
/// let r = issubstr(&[Value::from("LIN"), Value::from("linux")]).unwrap();
/// assert_eq!(r, Value::Bool(true));
/// ```
pub fn issubstr(args: &[Value]) -> EvalResult<Value> {
    match args {
        [Value::Str(needle), Value::Str(haystack)] => {
            Ok(Value::Bool(haystack.to_lowercase().contains(&needle.to_lowercase())))
        },
        _ => Err(unsupported("issubstr", args)),
    }
}

/// Escapes a string so it can sit between double quotes in Java or C source.
///
/// Quotes, backslashes, and the usual control characters get backslash
/// escapes; other control characters become `\uXXXX`.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::string::str2java, value::core::Value};
///
/// let r = str2java(&[Value::from("say \"hi\"\n")]).unwrap();
/// assert_eq!(r, Value::from("say \\\"hi\\\"\\n"));
/// ```
pub fn str2java(args: &[Value]) -> EvalResult<Value> {
    let [Value::Str(s)] = args else {
        return Err(unsupported("str2java", args));
    };

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            },
            c => out.push(c),
        }
    }

    Ok(Value::Str(out))
}
