use std::fmt;

use crate::{
    ast::Expr,
    context::variables::is_variable_name,
    directive::handlers,
    error::{ParseError, PreprocessError},
    interpreter::parser::core::{parse, parse_list},
    pipeline::session::Session,
};

/// What the file pipeline does after a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Go on with the next line.
    Continue,
    /// Stop reading the current source; an included file returns to its
    /// includer.
    ExitSource,
    /// Drop the whole output of the file being processed.
    ExcludeFile,
}

/// Result type used by directive handlers.
pub type DirectiveResult = Result<Flow, PreprocessError>;

/// Handler called with the directive's table entry and the text after the
/// keyword.
pub type Handler = fn(&mut Session<'_>, &'static DirectiveDef, &str) -> DirectiveResult;

/// The form a directive's argument text must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// No argument; a trailing `//` comment is allowed.
    None,
    /// One expression.
    Expression,
    /// Zero or more comma-separated expressions.
    MultiExpression,
    /// Free text, kept verbatim.
    TailText,
    /// One variable name.
    VariableName,
    /// `name` or `name = expression`.
    Assignment,
}

/// A directive argument decoded according to its [`ArgumentShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveArgument {
    None,
    Expression(Expr),
    Expressions(Vec<Expr>),
    Text(String),
    Name(String),
    Assignment {
        name:  String,
        value: Option<Expr>,
    },
}

/// Why an argument could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// An expression failed to parse.
    Parse(ParseError),
    /// The text does not have the required form.
    Malformed(String),
}

/// Metadata and handler of one directive.
pub struct DirectiveDef {
    /// The keyword after `//#`.
    pub name:        &'static str,
    /// The form of the argument text.
    pub shape:       ArgumentShape,
    /// Runs inside suppressed regions, to keep track of nesting.
    pub conditional: bool,
    /// The implementation.
    pub handler:     Handler,
    /// Short human-readable description.
    pub description: &'static str,
}

impl fmt::Debug for DirectiveDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveDef")
         .field("name", &self.name)
         .field("shape", &self.shape)
         .field("conditional", &self.conditional)
         .finish_non_exhaustive()
    }
}

/// Defines directives by generating a lookup table and a keyword list.
///
/// The macro produces:
/// - `DIRECTIVE_TABLE` (static table for lookup),
/// - `DIRECTIVE_NAMES` (public list of keywords).
macro_rules! directives {
    (
        $(
            $name:literal => {
                shape: $shape:expr,
                conditional: $conditional:expr,
                handler: $handler:expr,
                description: $description:literal $(,)?
            }
        ),* $(,)?
    ) => {
        static DIRECTIVE_TABLE: &[DirectiveDef] = &[
            $(
                DirectiveDef { name: $name,
                               shape: $shape,
                               conditional: $conditional,
                               handler: $handler,
                               description: $description },
            )*
        ];
        pub const DIRECTIVE_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

directives! {
    "if"        => { shape: ArgumentShape::Expression, conditional: true, handler: handlers::if_directive, description: "open a conditional block" },
    "ifdef"     => { shape: ArgumentShape::VariableName, conditional: true, handler: handlers::ifdef, description: "open a block taken when the variable is defined" },
    "ifndef"    => { shape: ArgumentShape::VariableName, conditional: true, handler: handlers::ifndef, description: "open a block taken when the variable is not defined" },
    "elif"      => { shape: ArgumentShape::Expression, conditional: true, handler: handlers::elif, description: "alternative branch of the enclosing block" },
    "else"      => { shape: ArgumentShape::None, conditional: true, handler: handlers::else_directive, description: "final branch of the enclosing block" },
    "endif"     => { shape: ArgumentShape::None, conditional: true, handler: handlers::endif, description: "close the enclosing block" },
    "define"    => { shape: ArgumentShape::Assignment, conditional: false, handler: handlers::define, description: "set a local variable, true when no value is given" },
    "local"     => { shape: ArgumentShape::Assignment, conditional: false, handler: handlers::local, description: "set a local variable" },
    "global"    => { shape: ArgumentShape::Assignment, conditional: false, handler: handlers::global, description: "set a global variable" },
    "undef"     => { shape: ArgumentShape::VariableName, conditional: false, handler: handlers::undef, description: "remove a local variable, or else a global one" },
    "action"    => { shape: ArgumentShape::MultiExpression, conditional: false, handler: handlers::action, description: "call the extension with the evaluated arguments" },
    "include"   => { shape: ArgumentShape::Expression, conditional: false, handler: handlers::include, description: "process a file in place, relative to the current file" },
    "echo"      => { shape: ArgumentShape::TailText, conditional: false, handler: handlers::echo, description: "log the text at info level" },
    "warning"   => { shape: ArgumentShape::TailText, conditional: false, handler: handlers::warning, description: "log the text at warning level" },
    "error"     => { shape: ArgumentShape::TailText, conditional: false, handler: handlers::error, description: "fail the file with the text" },
    "exit"      => { shape: ArgumentShape::None, conditional: false, handler: handlers::exit, description: "stop processing the current file" },
    "exitif"    => { shape: ArgumentShape::Expression, conditional: false, handler: handlers::exitif, description: "stop processing the current file if the condition holds" },
    "excludeif" => { shape: ArgumentShape::Expression, conditional: false, handler: handlers::excludeif, description: "produce no output for the file if the condition holds" },
}

/// Finds a directive by keyword. Keywords are case-sensitive.
///
/// # Example
/// ```
/// use sift::directive::registry::{ArgumentShape, lookup_directive};
///
/// assert_eq!(lookup_directive("elif").unwrap().shape, ArgumentShape::Expression);
/// assert!(lookup_directive("pragma").is_none());
/// ```
#[must_use]
pub fn lookup_directive(name: &str) -> Option<&'static DirectiveDef> {
    DIRECTIVE_TABLE.iter().find(|d| d.name == name)
}

/// Returns the whole directive table, in declaration order.
#[must_use]
pub const fn directives() -> &'static [DirectiveDef] {
    DIRECTIVE_TABLE
}

impl ArgumentShape {
    /// Decodes the text following a directive keyword.
    ///
    /// # Errors
    /// - `ShapeError::Parse` if an expression does not parse.
    /// - `ShapeError::Malformed` if the text does not have this shape.
    ///
    /// # Example
    /// ```
    /// use sift::directive::registry::{ArgumentShape, DirectiveArgument};
    ///
    /// assert_eq!(ArgumentShape::None.decode(" // closes the debug block"),
    ///            Ok(DirectiveArgument::None));
    /// assert!(ArgumentShape::None.decode(" stray").is_err());
    ///
    /// let DirectiveArgument::Assignment { name, value } =
    ///     ArgumentShape::Assignment.decode(" level = 2 + 1").unwrap()
    /// else {
    ///     panic!("expected an assignment");
    /// };
    /// assert_eq!(name, "level");
    /// assert!(value.is_some());
    /// ```
    pub fn decode(self, tail: &str) -> Result<DirectiveArgument, ShapeError> {
        let trimmed = tail.trim();

        match self {
            Self::None if trimmed.is_empty() || trimmed.starts_with("//") => Ok(DirectiveArgument::None),
            Self::None => Err(ShapeError::Malformed(format!("unexpected text '{trimmed}'"))),
            Self::Expression => parse(trimmed).map(DirectiveArgument::Expression)
                                              .map_err(ShapeError::Parse),
            Self::MultiExpression => parse_list(trimmed).map(DirectiveArgument::Expressions)
                                                        .map_err(ShapeError::Parse),
            Self::TailText => Ok(DirectiveArgument::Text(tail.trim_start().to_string())),
            Self::VariableName => variable_name(trimmed).map(DirectiveArgument::Name),
            Self::Assignment => match trimmed.split_once('=') {
                Some((name, expression)) => {
                    let name = variable_name(name.trim())?;
                    let expression = expression.trim();
                    if expression.is_empty() {
                        return Err(ShapeError::Malformed(format!("missing value after '{name} ='")));
                    }
                    let value = parse(expression).map_err(ShapeError::Parse)?;
                    Ok(DirectiveArgument::Assignment { name,
                                                       value: Some(value) })
                },
                None => Ok(DirectiveArgument::Assignment { name:  variable_name(trimmed)?,
                                                           value: None, }),
            },
        }
    }
}

impl DirectiveArgument {
    /// Returns the expression of an `Expression` argument.
    #[must_use]
    pub fn into_expression(self) -> Option<Expr> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Returns the expressions of a `MultiExpression` argument.
    #[must_use]
    pub fn into_expressions(self) -> Option<Vec<Expr>> {
        match self {
            Self::Expressions(exprs) => Some(exprs),
            _ => None,
        }
    }

    /// Returns the text of a `TailText` argument.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the name of a `VariableName` argument.
    #[must_use]
    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the parts of an `Assignment` argument.
    #[must_use]
    pub fn into_assignment(self) -> Option<(String, Option<Expr>)> {
        match self {
            Self::Assignment { name, value } => Some((name, value)),
            _ => None,
        }
    }
}

fn variable_name(text: &str) -> Result<String, ShapeError> {
    if text.is_empty() {
        return Err(ShapeError::Malformed("missing variable name".to_string()));
    }
    if !is_variable_name(text) {
        return Err(ShapeError::Malformed(format!("'{text}' is not a valid variable name")));
    }
    Ok(text.to_string())
}
