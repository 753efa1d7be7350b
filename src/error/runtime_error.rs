use crate::interpreter::value::core::ValueKind;

/// Represents all errors that can occur during expression evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A binary operator was applied to operand types it does not accept.
    #[error("Operator '{operator}' cannot be applied to {left} and {right}.")]
    TypeMismatch {
        /// The operator symbol.
        operator: String,
        /// Type of the left operand.
        left:     ValueKind,
        /// Type of the right operand.
        right:    ValueKind,
    },
    /// A unary operator was applied to an operand type it does not accept.
    #[error("Operator '{operator}' cannot be applied to {kind}.")]
    UnaryTypeMismatch {
        /// The operator symbol.
        operator: String,
        /// Type of the operand.
        kind:     ValueKind,
    },
    /// A boolean value was expected, but not found.
    #[error("Expected a boolean value, found {found}.")]
    ExpectedBoolean {
        /// Type of the value found instead.
        found: ValueKind,
    },
    /// A variable name could not be resolved.
    #[error("Unknown variable '{name}'.")]
    UnresolvedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Integer division or remainder by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A builtin function received an argument it cannot use.
    #[error("Invalid argument to '{function}': {details}.")]
    InvalidArgument {
        /// The function name.
        function: String,
        /// What was wrong with the argument.
        details:  String,
    },
    /// A builtin function received arguments of the wrong types.
    #[error("Function '{function}' cannot be applied to ({found}).")]
    FunctionTypeMismatch {
        /// The function name.
        function: String,
        /// Comma-separated types of the arguments given.
        found:    String,
    },
    /// A call names a function that does not exist.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// A call passes the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// The accepted argument count, as text.
        expected: String,
        /// The number of arguments given.
        found:    usize,
    },
    /// A write was attempted on a variable owned by a read-only provider.
    #[error("Variable '{name}' is read-only: {details}.")]
    ReadOnlyVariable {
        /// The name of the variable.
        name:    String,
        /// Reason reported by the provider.
        details: String,
    },
}
