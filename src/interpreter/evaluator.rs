/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic
/// and string concatenation, equality and ordering comparisons, and the
/// logic operators that act bitwise on integers.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the prefix operators: boolean negation and integer complement
/// (`!`), numeric negation (`-`), and numeric identity (`+`).
pub mod unary;

/// Core evaluation logic.
///
/// Contains the main evaluation entry points, which walk an expression tree
/// bottom-up against a [`VariableContext`](crate::context::core::VariableContext).
pub mod core;

/// Function evaluation.
///
/// Holds the builtin function table, arity checking, and the implementations
/// of every builtin.
pub mod function;
