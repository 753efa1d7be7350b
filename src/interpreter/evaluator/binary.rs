/// Dispatch of binary operators to their evaluation routines.
pub mod core;

/// Arithmetic operators and string concatenation.
///
/// Implements `+`, `-`, `*`, `/`, and `%` with integer wrapping, integer to
/// float promotion, and concatenation when either side of `+` is a string.
pub mod arithmetic;

/// Comparison operators.
///
/// Implements `==` and `!=` for operands of the same kind (with integer to
/// float promotion), and the ordering operators for numbers and strings.
pub mod comparison;

/// Logic operators.
///
/// Implements `&&`, `||`, and `^`: logical on booleans, bitwise on integers.
pub mod logic;
