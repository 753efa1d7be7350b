/// Numeric conversion and parsing helpers.
///
/// This module provides the conversions between `i64`, `usize`, and `f32`
/// used by the evaluator, and the integer text parsing shared by the lexer and
/// the `str2int` builtin. Conversions that can lose information return a
/// `Result` instead of truncating silently.
pub mod num;
