use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{convert, set, string},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and returns a value
/// wrapped in `EvalResult`.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` means the builtin accepts any number of arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

/// Metadata and implementation of one builtin function.
pub struct BuiltinDef {
    /// The name used in calls.
    pub name:        &'static str,
    /// Accepted argument count.
    pub arity:       Arity,
    /// The implementation.
    pub func:        BuiltinFn,
    /// Short human-readable description.
    pub description: &'static str,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity constraint,
/// - a function pointer implementing the builtin,
/// - a description for the reference listing.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr,
                description: $description:literal $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func, description: $description },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"       => { arity: Arity::Exact(1), func: convert::abs, description: "absolute value of an int or float" },
    "round"     => { arity: Arity::Exact(1), func: convert::round, description: "float rounded half away from zero to int" },
    "str2int"   => { arity: Arity::Exact(1), func: convert::str2int, description: "decimal or hex string parsed as int" },
    "str2float" => { arity: Arity::Exact(1), func: convert::str2float, description: "string parsed as float" },
    "str2bool"  => { arity: Arity::Exact(1), func: convert::str2bool, description: "\"true\" or \"false\" parsed as bool" },
    "tostr"     => { arity: Arity::Exact(1), func: convert::tostr, description: "any value rendered as a string" },
    "strlen"    => { arity: Arity::Exact(1), func: string::strlen, description: "character count of a string" },
    "issubstr"  => { arity: Arity::Exact(2), func: string::issubstr, description: "case-insensitive test that the first string occurs in the second" },
    "str2java"  => { arity: Arity::Exact(1), func: string::str2java, description: "string escaped as a Java string literal body" },
    "set"       => { arity: Arity::Variadic, func: set::set, description: "set of the distinct arguments" },
    "size"      => { arity: Arity::Exact(1), func: set::size, description: "member count of a set" },
    "contains"  => { arity: Arity::Exact(2), func: set::contains, description: "set membership" },
    "union"     => { arity: Arity::Exact(2), func: set::union, description: "members of either set" },
    "intersect" => { arity: Arity::Exact(2), func: set::intersect, description: "members of the first set also in the second" },
    "diff"      => { arity: Arity::Exact(2), func: set::diff, description: "members of the first set not in the second" },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Variadic => write!(f, "any number of"),
        }
    }
}

/// Finds a builtin by name, ignoring ASCII case.
///
/// # Example
/// ```
/// use sift::interpreter::evaluator::function::core::{Arity, lookup_builtin};
///
/// assert_eq!(lookup_builtin("StrLen").unwrap().arity, Arity::Exact(1));
/// assert!(lookup_builtin("sqrt").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Returns the whole builtin table, in declaration order.
#[must_use]
pub const fn builtins() -> &'static [BuiltinDef] {
    BUILTIN_TABLE
}

/// Calls a builtin with already evaluated arguments.
///
/// Arity is validated when a call is parsed; it is checked again here so
/// trees built by hand fail cleanly.
///
/// # Errors
/// - `RuntimeError::UnknownFunction` if no builtin has this name.
/// - `RuntimeError::ArgumentCountMismatch` if the arity does not match.
/// - Any error raised by the builtin itself.
///
/// # Example
/// ```
/// use sift::interpreter::{evaluator::function::core::call_builtin, value::core::Value};
///
/// let r = call_builtin("strlen", &[Value::from("héllo")]).unwrap();
/// assert_eq!(r, Value::Integer(5));
/// ```
pub fn call_builtin(name: &str, args: &[Value]) -> EvalResult<Value> {
    let builtin = lookup_builtin(name).ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

    if !builtin.arity.check(args.len()) {
        return Err(RuntimeError::ArgumentCountMismatch { name:     builtin.name.to_string(),
                                                         expected: builtin.arity.to_string(),
                                                         found:    args.len(), });
    }

    (builtin.func)(args)
}

/// Builds the error for a builtin applied to arguments of the wrong kinds.
pub(crate) fn unsupported(function: &str, args: &[Value]) -> RuntimeError {
    let found = args.iter()
                    .map(|arg| arg.kind().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

    RuntimeError::FunctionTypeMismatch { function: function.to_string(),
                                         found }
}
