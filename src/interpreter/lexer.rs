use std::fmt;

use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult, util::num::parse_hex};

/// Represents a lexical token of the expression language.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens; [`tokenize`] appends a final
/// [`Token::End`] so the parser always sees where the input stops.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Float literal tokens, such as `3.14`, `1e3` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Float(f32),
    /// Integer literal tokens, such as `42` or `0xFF`.
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_hex(&lex.slice()[2..]))]
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// Double-quoted string literals with their escapes already resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `debug` or
    /// `env.home`. Dots are part of the name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*", |lex| lex.slice().to_string())]
    Identifier(String),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
    /// End of the input. Never produced by the logos lexer itself.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Float(x) => return write!(f, "{x:?}"),
            Self::Integer(n) => return write!(f, "{n}"),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::Str(s) => return write!(f, "{s:?}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Caret => "^",
            Self::Bang => "!",
            Self::Ignored => " ",
            Self::End => "end of input",
        };
        write!(f, "{text}")
    }
}

/// Splits expression text into tokens paired with their byte offsets.
///
/// The returned vector always ends with `(Token::End, source.len())`.
///
/// # Errors
/// Returns `ParseError::Lexical` naming the first piece of text that is not
/// a valid token, such as an unterminated string or a stray `$`.
///
/// # Example
/// ```
/// use sift::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("a + 0x10").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("a".into()), 0),
///                 (Token::Plus, 2),
///                 (Token::Integer(16), 4),
///                 (Token::End, 8)]);
///
/// assert!(tokenize("1 $ 2").is_err());
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.span().start));
        } else {
            return Err(ParseError::Lexical { token:  lexer.slice().to_string(),
                                             offset: lexer.span().start, });
        }
    }
    tokens.push((Token::End, source.len()));

    Ok(tokens)
}

/// Resolves the escape sequences of a string literal body.
///
/// Supported escapes are `\n`, `\r`, `\t`, `\0`, `\\`, `\"` and `\'`.
///
/// # Returns
/// - `Some(String)`: The unescaped text.
/// - `None`: If the body contains an unknown escape or ends in a lone `\`.
///
/// # Example
/// ```
/// use sift::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r"a\tb\\").as_deref(), Some("a\tb\\"));
/// assert_eq!(unescape(r"bad\q"), None);
/// ```
#[must_use]
pub fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Some(f32)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f32> {
    lex.slice().parse().ok()
}
/// Parses a decimal integer literal from the current token slice.
///
/// Literals that do not fit in an `i64` are rejected.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
/// Strips the quotes of a string literal and resolves its escapes.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}
