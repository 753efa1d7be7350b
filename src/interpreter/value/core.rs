use std::fmt;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        lexer::{Token, tokenize},
        value::set_value::SetValue,
    },
};

/// Represents a runtime value produced by an expression.
///
/// Values are what variables hold, what functions receive and return, and what
/// a substitution block renders into the output text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed 64 bit integer. Arithmetic between two integers wraps.
    Integer(i64),
    /// A single precision floating-point number.
    Float(f32),
    /// A piece of text.
    Str(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and by logic
    /// operators applied to booleans. Conditions of `if`, `elif`, `exitif`,
    /// and `excludeif` directives must evaluate to `Bool`.
    Bool(bool),
    /// An insertion-ordered collection of distinct members.
    Set(Vec<SetValue>),
}

/// The type tag of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::Str`]
    Str,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Set`]
    Set,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Set => "set",
        };
        write!(f, "{name}")
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// Returns the type tag of this value.
    ///
    /// # Example
    /// ```
    /// use sift::interpreter::value::core::{Value, ValueKind};
    ///
    /// assert_eq!(Value::from("text").kind(), ValueKind::Str);
    /// assert_eq!(Value::from(3).kind(), ValueKind::Integer);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::Bool(_) => ValueKind::Bool,
            Self::Set(_) => ValueKind::Set,
        }
    }

    /// Attempts to extract a boolean from this value.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedBoolean` if the value is not a `Bool`.
    pub const fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { found: self.kind() }),
        }
    }

    /// Builds a set from the given values, dropping duplicates while keeping
    /// the first occurrence of each member in place.
    ///
    /// # Example
    /// ```
    /// use sift::interpreter::value::core::Value;
    ///
    /// let set = Value::set_of([Value::from(1), Value::from(2), Value::from(1)]);
    /// assert_eq!(set.to_string(), "{1, 2}");
    /// ```
    pub fn set_of(values: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(SetValue::collect_distinct(values.into_iter().map(SetValue::from)))
    }

    /// Interprets a raw piece of text as a typed value.
    ///
    /// Used for values that arrive as text: variables given on the command
    /// line, lines of configuration files, and environment variables.
    ///
    /// - `true` and `false` (in any letter case) become `Bool`.
    /// - Decimal and `0x` hexadecimal integers, optionally negative, become
    ///   `Integer`.
    /// - Float literals, optionally negative, become `Float`.
    /// - A double-quoted literal has its escapes resolved and becomes `Str`.
    /// - Anything else is kept verbatim as `Str`.
    ///
    /// # Example
    /// ```
    /// use sift::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::recognize("0x10"), Value::Integer(16));
    /// assert_eq!(Value::recognize("-2.5"), Value::Float(-2.5));
    /// assert_eq!(Value::recognize("TRUE"), Value::Bool(true));
    /// assert_eq!(Value::recognize("\"a\\tb\""), Value::from("a\tb"));
    /// assert_eq!(Value::recognize("plain text"), Value::from("plain text"));
    /// ```
    #[must_use]
    pub fn recognize(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.trim().eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }

        let (negative, body) = match raw.trim_start().strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        if let Ok(tokens) = tokenize(body)
           && let [(token, _), (Token::End, _)] = tokens.as_slice()
        {
            match (token, negative) {
                (Token::Integer(n), false) => return Self::Integer(*n),
                (Token::Integer(n), true) => return Self::Integer(n.wrapping_neg()),
                (Token::Float(x), false) => return Self::Float(*x),
                (Token::Float(x), true) => return Self::Float(-*x),
                (Token::Str(s), false) => return Self::Str(s.clone()),
                _ => {},
            }
        }

        Self::Str(raw.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write_float(f, *x),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Set(members) => {
                write!(f, "{{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// Writes `x` with at least one fractional digit, including in exponent
/// form (`1.0e-7`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f32) -> fmt::Result {
    let text = format!("{x:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => write!(f, "{mantissa}.0e{exponent}"),
        _ => f.write_str(&text),
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Float(x) => Self::Float(*x),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}
