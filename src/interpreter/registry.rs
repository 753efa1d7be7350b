use crate::ast::{BinaryOperator, UnaryOperator};

/// Binding strength of operators, from loosest to tightest.
///
/// Binary operators of equal precedence associate to the left. Unary operators
/// bind tighter than any binary operator, and function calls tighter still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `||`, `&&`, `^`
    Logical,
    /// `==`, `!=`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Relational,
    /// `+`, `-`
    Additive,
    /// `*`, `/`, `%`
    Multiplicative,
    /// `!`, `-`, `+` in prefix position.
    Unary,
    /// `name(...)`
    Call,
}

/// One row of the operator reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    /// The operator as written in an expression.
    pub symbol:      &'static str,
    /// Number of operands.
    pub arity:       usize,
    /// Binding strength.
    pub precedence:  Precedence,
    /// Short human-readable description.
    pub description: &'static str,
}

impl BinaryOperator {
    /// Every binary operator, in reference order.
    pub const ALL: [Self; 14] = [Self::Add,
                                 Self::Sub,
                                 Self::Mul,
                                 Self::Div,
                                 Self::Mod,
                                 Self::Equal,
                                 Self::NotEqual,
                                 Self::Less,
                                 Self::LessEqual,
                                 Self::Greater,
                                 Self::GreaterEqual,
                                 Self::And,
                                 Self::Or,
                                 Self::Xor];

    /// Returns the precedence tier of the operator.
    ///
    /// # Example
    /// ```
    /// use sift::{ast::BinaryOperator, interpreter::registry::Precedence};
    ///
    /// assert_eq!(BinaryOperator::Mul.precedence(), Precedence::Multiplicative);
    /// assert!(BinaryOperator::Add.precedence() > BinaryOperator::Less.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::And | Self::Or | Self::Xor => Precedence::Logical,
            Self::Equal | Self::NotEqual => Precedence::Equality,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual => {
                Precedence::Relational
            },
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div | Self::Mod => Precedence::Multiplicative,
        }
    }

    /// Returns the operator as written in an expression.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Xor => "^",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Add => "addition, or concatenation when either side is a string",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division; integer division truncates",
            Self::Mod => "remainder",
            Self::Equal => "equality",
            Self::NotEqual => "inequality",
            Self::Less => "less than",
            Self::LessEqual => "less than or equal",
            Self::Greater => "greater than",
            Self::GreaterEqual => "greater than or equal",
            Self::And => "logical and on booleans, bitwise and on integers",
            Self::Or => "logical or on booleans, bitwise or on integers",
            Self::Xor => "exclusive or on booleans and integers",
        }
    }
}

impl UnaryOperator {
    /// Every unary operator, in reference order.
    pub const ALL: [Self; 3] = [Self::Not, Self::Negate, Self::Plus];

    /// Returns the operator as written in an expression.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::Plus => "+",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Not => "negation on booleans, bitwise complement on integers",
            Self::Negate => "numeric negation",
            Self::Plus => "numeric identity",
        }
    }
}

/// Lists every operator with its arity, precedence, and description.
///
/// Used by the command-line reference output.
///
/// # Example
/// ```
/// use sift::interpreter::registry::operator_reference;
///
/// let table = operator_reference();
/// assert_eq!(table.len(), 17);
/// assert!(table.iter().any(|op| op.symbol == "%" && op.arity == 2));
/// ```
#[must_use]
pub fn operator_reference() -> Vec<OperatorInfo> {
    let unary = UnaryOperator::ALL.iter().map(|op| OperatorInfo { symbol:      op.symbol(),
                                                                  arity:       1,
                                                                  precedence:  Precedence::Unary,
                                                                  description: op.description(), });
    let binary = BinaryOperator::ALL.iter().map(|op| OperatorInfo { symbol:      op.symbol(),
                                                                    arity:       2,
                                                                    precedence:  op.precedence(),
                                                                    description: op.description(), });
    unary.chain(binary).collect()
}
