use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_binary, utils::parse_comma_separated},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses expression text into a single expression tree.
///
/// The whole text must form exactly one expression; anything left over is an
/// error.
///
/// # Errors
/// - `ParseError::Lexical` if the text contains an invalid token.
/// - `ParseError::EmptyExpression` if the text holds no tokens.
/// - `ParseError::UnmatchedParen` for a stray `)`.
/// - `ParseError::UnexpectedToken` for any other trailing token.
/// - Any error raised while parsing the expression itself.
///
/// # Example
/// ```
/// use sift::{ast::Expr, error::ParseError, interpreter::parser::core::parse};
///
/// let expr = parse("1 + 2 * 3").unwrap();
/// assert_eq!(expr.to_string(), "(1 + (2 * 3))");
///
/// assert_eq!(parse("   "), Err(ParseError::EmptyExpression));
/// assert_eq!(parse("(1))"), Err(ParseError::UnmatchedParen { offset: 3 }));
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    if let Some((Token::End, _)) = iter.peek() {
        return Err(ParseError::EmptyExpression);
    }

    let expr = parse_expression(&mut iter)?;

    match iter.next() {
        Some((Token::End, _)) | None => Ok(expr),
        Some((Token::RParen, offset)) => Err(ParseError::UnmatchedParen { offset: *offset }),
        Some((tok, offset)) => Err(ParseError::UnexpectedToken { token:  tok.to_string(),
                                                                 offset: *offset, }),
    }
}

/// Parses expression text into a list of independent expressions separated by
/// commas.
///
/// An empty text yields an empty list; an empty entry between commas is an
/// error.
///
/// # Errors
/// - `ParseError::EmptyArgument` for `a,,b`, `,a` or `a,`.
/// - Any error raised while parsing an entry.
///
/// # Example
/// ```
/// use sift::{error::ParseError, interpreter::parser::core::parse_list};
///
/// assert_eq!(parse_list("1, \"two\", x").unwrap().len(), 3);
/// assert!(parse_list("").unwrap().is_empty());
/// assert_eq!(parse_list("1,,2"), Err(ParseError::EmptyArgument { offset: 2 }));
/// ```
pub fn parse_list(source: &str) -> ParseResult<Vec<Expr>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    parse_comma_separated(&mut iter, &Token::End)
}

/// Parses a full expression.
///
/// This is the entry point for recursive parsing, used for the top level, for
/// parenthesised groups, and for every function argument. Each call starts
/// with empty operator stacks, so operators inside a group never reduce
/// against operators outside it.
///
/// Grammar: `expression := unary (binary_operator unary)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary(tokens)
}
