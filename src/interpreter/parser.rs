/// Parser entry points.
///
/// Turns expression text into an [`Expr`](crate::ast::Expr) tree, either as a
/// single expression or as a comma-separated list of independent expressions.
pub mod core;

/// Binary operator parsing.
///
/// Implements the operator-precedence loop that combines operands with
/// binary operators, using an explicit operand stack and pending-operator
/// stack.
pub mod binary;

/// Unary operator and primary parsing.
///
/// Handles prefix operators, literals, variables, parenthesised groups, and
/// function calls.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides the comma-separated list parser shared by function calls and
/// multi-expression directive arguments.
pub mod utils;
