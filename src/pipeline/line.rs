use crate::{context::core::VariableContext, error::ExpressionError};

/// Opens a substitution block.
pub const SUBSTITUTION_OPEN: &str = "/*$";
/// Closes a substitution block.
pub const SUBSTITUTION_CLOSE: &str = "$*/";

/// What a source line is, as far as the pipeline is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `//#keyword tail`
    Directive {
        keyword: &'a str,
        tail:    &'a str,
    },
    /// `//$text` (substituted) or `//$$text` (verbatim).
    Uncomment {
        /// Whitespace before the marker.
        indent:     &'a str,
        /// Length of the marker, `//$` or `//$$`.
        marker_len: usize,
        /// Text after the marker.
        text:       &'a str,
        /// Whether `/*$expr$*/` blocks in the text are substituted.
        substitute: bool,
    },
    /// Anything else.
    Text,
}

/// Classifies a line.
///
/// A directive is `//#` after optional indentation, followed by a keyword of
/// letters, digits, and `_`. With `allow_whitespace` set, whitespace between
/// `//` and `#` is accepted too. `//#` without a keyword is plain text.
///
/// # Example
/// ```
/// use sift::pipeline::line::{LineKind, classify};
///
/// assert_eq!(classify("  //#if DEBUG", false),
///            LineKind::Directive { keyword: "if", tail: " DEBUG" });
/// assert_eq!(classify("// #endif", false), LineKind::Text);
/// assert_eq!(classify("// #endif", true), LineKind::Directive { keyword: "endif", tail: "" });
/// assert_eq!(classify("\t//$$int x;", false),
///            LineKind::Uncomment { indent: "\t", marker_len: 4, text: "int x;", substitute: false });
/// ```
#[must_use]
pub fn classify(line: &str, allow_whitespace: bool) -> LineKind<'_> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    let Some(comment) = trimmed.strip_prefix("//") else {
        return LineKind::Text;
    };

    if let Some(text) = comment.strip_prefix("$$") {
        return LineKind::Uncomment { indent,
                                     marker_len: 4,
                                     text,
                                     substitute: false };
    }
    if let Some(text) = comment.strip_prefix('$') {
        return LineKind::Uncomment { indent,
                                     marker_len: 3,
                                     text,
                                     substitute: true };
    }

    let body = if allow_whitespace { comment.trim_start() } else { comment };
    if let Some(directive) = body.strip_prefix('#') {
        let end = directive.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                           .unwrap_or(directive.len());
        if end > 0 {
            return LineKind::Directive { keyword: &directive[..end],
                                         tail:    &directive[end..], };
        }
    }

    LineKind::Text
}

/// Replaces every `/*$expr$*/` block in `line` by the rendered value of
/// `expr`. An opener without a closer is left as it is.
///
/// # Errors
/// The first `ExpressionError` raised by a block.
///
/// # Example
/// ```
/// use sift::{
///     context::{core::VariableContext, variables::Variables},
///     interpreter::value::core::Value,
///     pipeline::line::substitute,
/// };
///
/// let mut globals = Variables::new();
/// globals.set("build", Value::Integer(41));
/// let context = VariableContext::new(&globals);
///
/// assert_eq!(substitute("int BUILD = /*$build + 1$*/;", &context).unwrap(),
///            "int BUILD = 42;");
/// assert_eq!(substitute("open /*$ only", &context).unwrap(), "open /*$ only");
/// ```
pub fn substitute(line: &str, context: &VariableContext<'_>) -> Result<String, ExpressionError> {
    if !line.contains(SUBSTITUTION_OPEN) {
        return Ok(line.to_string());
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find(SUBSTITUTION_OPEN) {
        let body = &rest[start + SUBSTITUTION_OPEN.len()..];
        let Some(end) = body.find(SUBSTITUTION_CLOSE) else {
            break;
        };

        out.push_str(&rest[..start]);
        out.push_str(&context.eval_source(&body[..end])?.to_string());
        rest = &body[end + SUBSTITUTION_CLOSE.len()..];
    }
    out.push_str(rest);

    Ok(out)
}
