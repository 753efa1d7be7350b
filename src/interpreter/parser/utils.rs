use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a comma-separated list of expressions until a closing token.
///
/// This utility is shared by function argument lists (closed by `)`) and the
/// multi-expression arguments of directives (closed by the end of input). It
/// repeatedly parses one expression, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. A comma
/// directly followed by another comma or by the closing token is an empty
/// argument.
///
/// Grammar (simplified): `list := (expression ("," expression)*)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `closing`: The token that terminates the list (`)` or end of input).
///
/// # Returns
/// A vector of parsed expressions.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an argument between commas is empty,
/// - the stream ends before the closing parenthesis,
/// - an unexpected token is encountered.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I>(tokens: &mut Peekable<I>,
                                                                   closing: &Token)
                                                                   -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        match tokens.peek() {
            Some((Token::Comma, offset)) => {
                return Err(ParseError::EmptyArgument { offset: *offset });
            },
            Some((tok, offset)) if tok == closing => {
                return Err(ParseError::EmptyArgument { offset: *offset });
            },
            _ => {},
        }

        items.push(parse_expression(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((Token::End, offset)) => {
                return Err(ParseError::ExpectedClosingParen { offset: *offset });
            },
            Some((Token::RParen, offset)) => {
                return Err(ParseError::UnmatchedParen { offset: *offset });
            },
            Some((tok, offset)) => {
                return Err(ParseError::UnexpectedToken { token:  tok.to_string(),
                                                         offset: *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { offset: 0 }),
        }
    }
    Ok(items)
}
