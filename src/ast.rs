use std::fmt;

/// Represents a literal value in the expression language.
///
/// `LiteralValue` covers the constants that can appear directly in an
/// expression: numbers, strings, and booleans. Sets have no literal syntax and
/// are built with the `set(...)` builtin instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal, decimal or `0x` hexadecimal.
    Integer(i64),
    /// A 32-bit floating-point literal.
    Float(f32),
    /// A string literal with its escapes resolved.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for LiteralValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every node records the byte offset of the token that produced it, so errors
/// can point into the directive text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Literal {
        /// The constant value.
        value:  LiteralValue,
        /// Byte offset in the expression text.
        offset: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable, as written.
        name:   String,
        /// Byte offset in the expression text.
        offset: usize,
    },
    /// A prefix operation such as `!flag` or `-x`.
    UnaryOp {
        /// The unary operator.
        op:     UnaryOperator,
        /// The operand.
        expr:   Box<Self>,
        /// Byte offset of the operator.
        offset: usize,
    },
    /// A binary operation such as `a + b` or `x == 2`.
    BinaryOp {
        /// The left operand.
        left:   Box<Self>,
        /// The binary operator.
        op:     BinaryOperator,
        /// The right operand.
        right:  Box<Self>,
        /// Byte offset of the operator.
        offset: usize,
    },
    /// A call to a builtin function.
    FunctionCall {
        /// The function name.
        name:      String,
        /// The argument expressions, in order.
        arguments: Vec<Self>,
        /// Byte offset of the function name.
        offset:    usize,
    },
}

impl Expr {
    /// Returns the byte offset recorded for this node.
    ///
    /// # Example
    /// ```
    /// use sift::interpreter::parser::core::parse;
    ///
    /// let expr = parse("1 + 2").unwrap();
    /// assert_eq!(expr.offset(), 2);
    /// ```
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Literal { offset, .. }
            | Self::Variable { offset, .. }
            | Self::UnaryOp { offset, .. }
            | Self::BinaryOp { offset, .. }
            | Self::FunctionCall { offset, .. } => *offset,
        }
    }
}

/// Supported binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`, numeric addition or string concatenation.
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`, logical on booleans, bitwise on integers.
    And,
    /// `||`, logical on booleans, bitwise on integers.
    Or,
    /// `^`, exclusive or on booleans and integers.
    Xor,
}

/// Supported unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `!`, negation on booleans, bitwise complement on integers.
    Not,
    /// `-`
    Negate,
    /// `+`
    Plus,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}
