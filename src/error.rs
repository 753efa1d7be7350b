/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// expression text. Parse errors include unrecognised characters, unexpected
/// tokens, unbalanced parentheses, unknown functions, and wrong argument
/// counts, all detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating an expression
/// tree. Runtime errors include type mismatches, division by zero, unresolved
/// variables, and writes to read-only variables.
pub mod runtime_error;
/// Preprocessing errors.
///
/// Errors raised while processing a file: unbalanced or unknown directives,
/// malformed directive arguments, user `#error` directives, failed includes,
/// and I/O or configuration failures. Every error tied to a line carries its
/// [`Location`](preprocess_error::Location).
pub mod preprocess_error;

pub use parse_error::ParseError;
pub use preprocess_error::{Location, PreprocessError};
pub use runtime_error::RuntimeError;

/// Either phase of turning expression text into a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// The text could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed expression failed to evaluate.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
