/// The evaluator module computes the value of an expression tree.
///
/// Evaluation is implemented on
/// [`VariableContext`](crate::context::core::VariableContext): the tree is
/// walked bottom-up, variables are resolved through the context's layers, and
/// operators dispatch on the runtime kinds of their operands.
///
/// # Responsibilities
/// - Evaluates literals, variables, unary and binary operators, and builtin
///   calls.
/// - Reports runtime errors such as type mismatches, division by zero, and
///   unresolved variables.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw text of a directive argument or a substitution
/// block and produces tokens with their byte offsets: numbers, strings,
/// booleans, identifiers, operators, and delimiters.
///
/// # Responsibilities
/// - Converts the input into tokens, ending with an explicit end marker.
/// - Handles decimal and hexadecimal integers, floats, and escaped strings.
/// - Reports lexical errors for unrecognised characters.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// # Responsibilities
/// - Applies operator precedence and left associativity.
/// - Validates builtin names and argument counts while parsing.
/// - Reports syntax errors with the offset of the offending token.
pub mod parser;
/// Operator metadata.
///
/// Precedence levels, symbols, and descriptions of every operator, used by
/// the parser and by the command-line reference listing.
pub mod registry;
/// The value module defines the runtime data types for evaluation.
///
/// Values are integers, floats, strings, booleans, and sets. This module also
/// recognises raw values, such as configuration entries, as the most specific
/// kind they spell.
pub mod value;
