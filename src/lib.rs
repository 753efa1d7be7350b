//! # sift
//!
//! sift is a comment-directive preprocessor for source trees written in Rust.
//! Directives such as `//#if`, `//#define`, and `//#include` live inside line
//! comments, so unprocessed sources stay valid in their own language. A small
//! typed expression language drives conditions and `/*$expr$*/`
//! substitutions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    config::PreprocessorConfig,
    context::{core::VariableContext, variables::Variables},
    error::{ExpressionError, PreprocessError},
    interpreter::value::core::Value,
    pipeline::file::{FileOutput, FilePipeline},
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator and literal types
/// that represent an expression as a tree. Every node records the byte offset
/// it was parsed from.
pub mod ast;
/// Run configuration.
///
/// Declares `PreprocessorConfig`, its defaults and validation, and the
/// `name=value` config file format that seeds the global variable layer.
pub mod config;
/// Variable storage and lookup.
///
/// # Responsibilities
/// - Stores the global and local variable layers.
/// - Lets external providers own namespaces of special variables.
/// - Resolves names through every layer in a fixed priority.
pub mod context;
/// Comment-embedded directives.
///
/// Declares every directive, the conditional nesting state, and the handlers
/// that act on a file being processed.
pub mod directive;
/// Provides unified error types for parsing, evaluation, and preprocessing.
///
/// Expression errors carry the byte offset of the failure inside the
/// expression text; preprocessing errors carry the file, line number, and
/// line text.
pub mod error;
/// The pluggable handler for `#action` directives.
pub mod extension;
/// The expression language: lexer, parser, evaluator, and runtime values.
pub mod interpreter;
/// Line-by-line processing of one file.
pub mod pipeline;
/// Whole-run driver.
///
/// Walks the source roots, preprocesses or copies each file into the
/// destination, and reports a summary.
pub mod runner;
/// General utilities for safe numeric conversion and helpers.
pub mod util;

/// Parses and evaluates an expression with no variables defined.
///
/// # Errors
/// Returns an error if the text does not parse or does not evaluate.
///
/// # Examples
/// ```
/// use sift::{evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("1 + 2 * 3").unwrap(), Value::Integer(7));
/// assert_eq!(evaluate("\"v\" + 1.5").unwrap(), Value::from("v1.5"));
/// assert_eq!(evaluate("!10").unwrap(), Value::Integer(-11));
///
/// // Unknown variables are an error.
/// assert!(evaluate("debug && true").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, ExpressionError> {
    let globals = Variables::new();
    VariableContext::new(&globals).eval_source(source)
}

/// Preprocesses a single text with the given configuration.
///
/// Globals come from the configuration and its config files; includes are
/// resolved relative to the current directory. An excluded text yields an
/// empty string.
///
/// # Errors
/// Returns the first error raised while loading globals or processing the
/// text.
///
/// # Examples
/// ```
/// use sift::{config::PreprocessorConfig, preprocess_str};
///
/// let config = PreprocessorConfig::default();
/// let output = preprocess_str("//#if 1==1\nkept\n//#else\ndropped\n//#endif", &config).unwrap();
/// assert_eq!(output, "kept\n");
/// ```
pub fn preprocess_str(source: &str, config: &PreprocessorConfig) -> Result<String, PreprocessError> {
    let mut globals = config.load_globals()?;
    let output = FilePipeline::new(config, &mut globals).process_str(Path::new("<input>"), source)?;

    Ok(match output {
        FileOutput::Text(text) => text,
        FileOutput::Excluded => String::new(),
    })
}
