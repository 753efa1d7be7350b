use std::{fmt, io, path::PathBuf};

use crate::error::ExpressionError;

/// A line of a source file: where an error happened and what it said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path of the file being processed.
    pub file: PathBuf,
    /// One-based line number.
    pub line: usize,
    /// The full text of the line.
    pub text: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: `{}`", self.file.display(), self.line, self.text.trim())
    }
}

/// Represents all errors that can stop the preprocessing of a file or run.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// An expression in a directive or substitution failed to parse or
    /// evaluate.
    #[error("{location}: {source}")]
    Expression {
        /// Where the expression appeared.
        location: Location,
        /// The underlying parse or runtime error.
        source:   ExpressionError,
    },
    /// `#else`, `#elif`, or `#endif` without a matching `#if`, a repeated
    /// `#else`, or an `#if` left open at the end of a file.
    #[error("{location}: Unbalanced directive: {details}.")]
    UnbalancedDirective {
        /// The offending directive, or the unclosed `#if` at end of file.
        location: Location,
        /// What was unbalanced.
        details:  String,
    },
    /// A directive keyword that is not registered, met in an active region.
    #[error("{location}: Unknown directive '#{name}'.")]
    UnknownDirective {
        /// Where the directive appeared.
        location: Location,
        /// The keyword as written.
        name:     String,
    },
    /// A directive argument does not have the shape the directive needs.
    #[error("{location}: Malformed directive: {details}.")]
    MalformedDirective {
        /// Where the directive appeared.
        location: Location,
        /// What was wrong with the argument.
        details:  String,
    },
    /// The registered extension rejected an `#action`.
    #[error("{location}: Extension failure: {details}.")]
    ExtensionFailure {
        /// Where the action appeared.
        location: Location,
        /// What the extension rejected.
        details:  String,
    },
    /// An `#error` directive was reached.
    #[error("{location}: {message}")]
    UserError {
        /// Where the directive appeared.
        location: Location,
        /// The message after substitution.
        message:  String,
    },
    /// Includes nested deeper than the allowed limit.
    #[error("{location}: Includes nested deeper than {depth} levels.")]
    IncludeDepth {
        /// The `#include` that went too deep.
        location: Location,
        /// The depth limit.
        depth:    usize,
    },
    /// An included file could not be read.
    #[error("{location}: Cannot include '{}': {source}", path.display())]
    Include {
        /// The `#include` directive.
        location: Location,
        /// The resolved path of the included file.
        path:     PathBuf,
        /// The underlying I/O error.
        source:   io::Error,
    },
    /// A file could not be read, written, copied, or walked.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path involved.
        path:   PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The configuration is invalid.
    #[error("Configuration error: {details}.")]
    Config {
        /// What was wrong.
        details: String,
    },
}

impl PreprocessError {
    /// Returns the source line the error is attached to, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Expression { location, .. }
            | Self::UnbalancedDirective { location, .. }
            | Self::UnknownDirective { location, .. }
            | Self::MalformedDirective { location, .. }
            | Self::ExtensionFailure { location, .. }
            | Self::UserError { location, .. }
            | Self::IncludeDepth { location, .. }
            | Self::Include { location, .. } => Some(location),
            Self::Io { .. } | Self::Config { .. } => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(),
                   source }
    }

    pub(crate) fn config(details: impl Into<String>) -> Self {
        Self::Config { details: details.into() }
    }
}
