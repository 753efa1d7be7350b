/// Builtin function table.
///
/// Declares every builtin with its arity, and provides lookup and dispatch.
pub mod core;
/// Numeric and conversion builtins.
///
/// `abs`, `round`, `str2int`, `str2float`, `str2bool`, and `tostr`.
pub mod convert;
/// String builtins.
///
/// `strlen`, `issubstr`, and `str2java`.
pub mod string;
/// Set builtins.
///
/// `set`, `size`, `contains`, `union`, `intersect`, and `diff`.
pub mod set;
