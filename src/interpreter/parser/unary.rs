use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        evaluator::function::core::lookup_builtin,
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `!`  (logical not, or bitwise complement on integers)
/// - `-`  (numeric negation)
/// - `+`  (numeric identity)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`].
///
/// Grammar:
/// ```text
///     unary := ("!" | "-" | "+") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Bang, _)) => Some(UnaryOperator::Not),
        Some((Token::Minus, _)) => Some(UnaryOperator::Negate),
        Some((Token::Plus, _)) => Some(UnaryOperator::Plus),
        _ => None,
    };

    if let Some(op) = op
       && let Some((_, offset)) = tokens.next()
    {
        let expr = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  offset: *offset });
    }

    parse_primary(tokens)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - integer, float, string, and boolean literals
/// - variables
/// - function calls
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | identifier "(" arguments ")"
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, offset) = tokens.next()
                                .ok_or(ParseError::UnexpectedEndOfInput { offset: 0 })?;
    let offset = *offset;

    let literal = |value: LiteralValue| -> ParseResult<Expr> { Ok(Expr::Literal { value, offset }) };

    match token {
        Token::Integer(n) => literal(LiteralValue::Integer(*n)),
        Token::Float(x) => literal(LiteralValue::Float(*x)),
        Token::Str(s) => literal(LiteralValue::Str(s.clone())),
        Token::Bool(b) => literal(LiteralValue::Bool(*b)),
        Token::Identifier(name) => {
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                parse_function_call(tokens, name, offset)
            } else {
                Ok(Expr::Variable { name: name.clone(),
                                    offset })
            }
        },
        Token::LParen => parse_grouping(tokens, offset),
        Token::End => Err(ParseError::UnexpectedEndOfInput { offset }),
        Token::RParen => Err(ParseError::UnmatchedParen { offset }),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 offset }),
    }
}

/// Parses a parenthesized expression `( expression )`.
///
/// The opening parenthesis has already been consumed.
///
/// # Errors
/// - `ParseError::ExpectedClosingParen` if the input ends before `)`.
/// - `ParseError::UnexpectedToken` if another token stands where `)` belongs.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, open: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((Token::End, _)) | None => Err(ParseError::ExpectedClosingParen { offset: open }),
        Some((tok, offset)) => Err(ParseError::UnexpectedToken { token:  tok.to_string(),
                                                                 offset: *offset, }),
    }
}

/// Parses the argument list of a function call and validates it against the
/// builtin table.
///
/// The opening parenthesis has already been consumed.
///
/// # Errors
/// - `ParseError::UnknownFunction` if no builtin has this name.
/// - `ParseError::ArgumentCountMismatch` if the arity does not match.
/// - Any error raised while parsing an argument.
fn parse_function_call<'a, I>(tokens: &mut Peekable<I>,
                              name: &str,
                              offset: usize)
                              -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let builtin = lookup_builtin(name).ok_or_else(|| {
                                          ParseError::UnknownFunction { name: name.to_string(),
                                                                        offset }
                                      })?;

    let arguments = parse_comma_separated(tokens, &Token::RParen)?;

    if !builtin.arity.check(arguments.len()) {
        return Err(ParseError::ArgumentCountMismatch { name: builtin.name.to_string(),
                                                       expected: builtin.arity.to_string(),
                                                       found: arguments.len(),
                                                       offset });
    }

    Ok(Expr::FunctionCall { name: builtin.name.to_string(),
                            arguments,
                            offset })
}
