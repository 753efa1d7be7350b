use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses a chain of operands joined by binary operators.
///
/// Operands go onto an operand stack and operators onto a pending stack.
/// Before a new operator is pushed, every pending operator whose precedence is
/// greater than or equal to it is reduced, which makes operators of equal
/// precedence associate to the left.
///
/// The rule is: `binary := unary (binary_operator unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with offset information.
///
/// # Returns
/// An `Expr::BinaryOp` tree, or the single operand if no operator follows.
///
/// # Errors
/// - `ParseError::DanglingOperator` if an operator ends the input, a group or
///   an argument.
/// - Any error raised while parsing an operand.
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut operands = vec![parse_unary(tokens)?];
    let mut pending: Vec<(BinaryOperator, usize)> = Vec::new();

    while let Some((token, offset)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
    {
        let offset = *offset;
        tokens.next();

        if let Some((Token::End | Token::RParen | Token::Comma, _)) = tokens.peek() {
            return Err(ParseError::DanglingOperator { operator: op.to_string(),
                                                      offset });
        }

        while let Some(&(top, _)) = pending.last()
              && top.precedence() >= op.precedence()
        {
            reduce(&mut operands, &mut pending);
        }
        pending.push((op, offset));
        operands.push(parse_unary(tokens)?);
    }

    while !pending.is_empty() {
        reduce(&mut operands, &mut pending);
    }

    operands.pop().ok_or(ParseError::EmptyExpression)
}

/// Pops the topmost pending operator together with its two operands and pushes
/// the combined node back onto the operand stack.
///
/// The operand stack always holds exactly one more entry than the pending
/// stack.
fn reduce(operands: &mut Vec<Expr>, pending: &mut Vec<(BinaryOperator, usize)>) {
    if let Some((op, offset)) = pending.pop()
       && let Some(right) = operands.pop()
       && let Some(left) = operands.pop()
    {
        operands.push(Expr::BinaryOp { left: Box::new(left),
                                       op,
                                       right: Box::new(right),
                                       offset });
    }
}

/// Maps a token to the corresponding binary operator, if any.
///
/// # Parameters
/// - `token`: The token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token represents a binary operator, or
/// `None` otherwise.
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::AmpAmp => Some(BinaryOperator::And),
        Token::PipePipe => Some(BinaryOperator::Or),
        Token::Caret => Some(BinaryOperator::Xor),
        _ => None,
    }
}
