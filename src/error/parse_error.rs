/// Represents all errors that can occur while tokenizing or parsing an
/// expression.
///
/// Offsets are byte positions within the expression text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer met text that is not a valid token.
    #[error("Error at offset {offset}: Unrecognised input '{token}'.")]
    Lexical {
        /// The offending text.
        token:  String,
        /// Byte offset of the text.
        offset: usize,
    },
    /// A token appeared where it is not allowed.
    #[error("Error at offset {offset}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The offending token.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
    /// The input ended while an operand was still expected.
    #[error("Error at offset {offset}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of the input.
        offset: usize,
    },
    /// A `(` was never closed.
    #[error("Error at offset {offset}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Byte offset of the opening parenthesis.
        offset: usize,
    },
    /// A `)` appeared without a matching `(`.
    #[error("Error at offset {offset}: Unmatched closing parenthesis ')'.")]
    UnmatchedParen {
        /// Byte offset of the stray parenthesis.
        offset: usize,
    },
    /// A binary operator is missing its right operand.
    #[error("Error at offset {offset}: Operator '{operator}' is missing its right operand.")]
    DanglingOperator {
        /// The operator symbol.
        operator: String,
        /// Byte offset of the operator.
        offset:   usize,
    },
    /// Two commas, or a comma and a bracket, with nothing between them.
    #[error("Error at offset {offset}: Empty argument in list.")]
    EmptyArgument {
        /// Byte offset where the argument was expected.
        offset: usize,
    },
    /// The expression text is empty.
    #[error("Error: Expression is empty.")]
    EmptyExpression,
    /// A call names a function that does not exist.
    #[error("Error at offset {offset}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The function name.
        name:   String,
        /// Byte offset of the name.
        offset: usize,
    },
    /// A call passes the wrong number of arguments.
    #[error("Error at offset {offset}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// The accepted argument count, as text.
        expected: String,
        /// The number of arguments given.
        found:    usize,
        /// Byte offset of the name.
        offset:   usize,
    },
}

impl ParseError {
    /// Returns `true` for lexical errors, `false` for syntax errors.
    ///
    /// # Example
    /// ```
    /// use sift::interpreter::parser::core::parse;
    ///
    /// assert!(parse("1 $ 2").unwrap_err().is_lexical());
    /// assert!(!parse("(1 + 2").unwrap_err().is_lexical());
    /// ```
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical { .. })
    }
}
