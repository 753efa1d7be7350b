use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use sift::{
    config::{DEFAULT_EXCLUDED_EXTENSIONS, DEFAULT_EXTENSIONS, PreprocessorConfig, UTF_8},
    context::special::{EnvironmentVariables, SpecialVariables},
    directive::registry::directives,
    interpreter::{evaluator::function::core::builtins, lexer::unescape, registry::operator_reference, value::core::Value},
    runner::Preprocessor,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// sift preprocesses source trees driven by directives written in line
/// comments, such as `//#if`, `//#define`, and `//#include`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// Source folders or files to process.
    #[arg(required_unless_present = "reference")]
    sources: Vec<PathBuf>,

    /// Folder receiving the output tree.
    #[arg(short, long, default_value = "preprocessed")]
    destination: PathBuf,

    /// Global variable as `name=value`, or `name` for `true`. Repeatable.
    #[arg(short = 'D', value_name = "NAME[=VALUE]", value_parser = parse_define)]
    define: Vec<(String, Value)>,

    /// File of `name=value` lines loaded into the globals. Repeatable.
    #[arg(short, long = "config", value_name = "FILE")]
    config_files: Vec<PathBuf>,

    /// Expose the process environment as `env.*` variables.
    #[arg(long)]
    env: bool,

    /// Extensions of files to preprocess.
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_EXTENSIONS.iter().copied())]
    extensions: Vec<String>,

    /// Extensions of files to leave out of the output.
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_EXCLUDED_EXTENSIONS.iter().copied())]
    excluded_extensions: Vec<String>,

    /// Glob pattern of folders to skip, relative to their source root.
    /// Repeatable.
    #[arg(long = "exclude-folder", value_name = "PATTERN")]
    excluded_folders: Vec<String>,

    /// Encoding of source files.
    #[arg(long, default_value = UTF_8)]
    source_encoding: String,

    /// Encoding of written files.
    #[arg(long, default_value = UTF_8)]
    destination_encoding: String,

    /// Line terminator, with escapes such as `\r\n`.
    #[arg(long, default_value = "\\n")]
    eol: String,

    /// Keep comments in preprocessed output.
    #[arg(long)]
    keep_comments: bool,

    /// Replace directive and suppressed lines by empty lines.
    #[arg(long)]
    keep_lines: bool,

    /// Log every file and directive.
    #[arg(short, long)]
    verbose: bool,

    /// Do everything except writing files.
    #[arg(long)]
    dry_run: bool,

    /// Empty the destination before the run.
    #[arg(long)]
    clear: bool,

    /// Omit the final line terminator when the source has none.
    #[arg(long)]
    care_for_trailing_eol: bool,

    /// Accept whitespace between `//` and `#`.
    #[arg(long)]
    allow_whitespace: bool,

    /// Replace `//$` markers by spaces instead of removing them.
    #[arg(long)]
    preserve_indent: bool,

    /// Copy file permissions to the destination.
    #[arg(long)]
    keep_attributes: bool,

    /// Evaluate unknown variables as `false`.
    #[arg(long)]
    unknown_as_false: bool,

    /// Do not rewrite destination files whose content is unchanged.
    #[arg(long)]
    skip_unchanged: bool,

    /// Skip missing sources and continue past failed files.
    #[arg(long)]
    ignore_missing: bool,

    /// Print the directives, operators, and functions, then exit.
    #[arg(long)]
    reference: bool,
}

fn parse_define(raw: &str) -> Result<(String, Value), String> {
    match raw.split_once('=') {
        Some((name, value)) => Ok((name.trim().to_string(), Value::recognize(value.trim()))),
        None if raw.trim().is_empty() => Err("expected NAME or NAME=VALUE".to_string()),
        None => Ok((raw.trim().to_string(), Value::Bool(true))),
    }
}

impl Args {
    fn into_config(self) -> Result<PreprocessorConfig, String> {
        let eol = unescape(&self.eol).ok_or_else(|| format!("invalid escape in line terminator '{}'", self.eol))?;
        let mut special_variables: Vec<Arc<dyn SpecialVariables>> = Vec::new();
        if self.env {
            special_variables.push(Arc::new(EnvironmentVariables::from_env()));
        }

        Ok(PreprocessorConfig { sources: self.sources,
                                destination: self.destination,
                                source_encoding: self.source_encoding,
                                destination_encoding: self.destination_encoding,
                                eol,
                                extensions: self.extensions,
                                excluded_extensions: self.excluded_extensions,
                                excluded_folders: self.excluded_folders,
                                config_files: self.config_files,
                                global_variables: self.define,
                                keep_comments: self.keep_comments,
                                keep_lines: self.keep_lines,
                                verbose: self.verbose,
                                dry_run: self.dry_run,
                                clear_destination: self.clear,
                                care_for_trailing_eol: self.care_for_trailing_eol,
                                allow_whitespace_before_directive: self.allow_whitespace,
                                preserve_indentation: self.preserve_indent,
                                keep_attributes: self.keep_attributes,
                                unknown_variable_as_false: self.unknown_as_false,
                                skip_unchanged: self.skip_unchanged,
                                ignore_missing_sources: self.ignore_missing,
                                special_variables,
                                extension: None })
    }
}

fn print_reference() {
    println!("Directives:");
    for directive in directives() {
        println!("  //#{:<10} {:<16} {}",
                 directive.name,
                 format!("{:?}", directive.shape),
                 directive.description);
    }

    println!("\nOperators:");
    for operator in operator_reference() {
        println!("  {:<3} {:<16} {}",
                 operator.symbol,
                 format!("{:?}", operator.precedence),
                 operator.description);
    }

    println!("\nFunctions:");
    for builtin in builtins() {
        println!("  {:<10} {:<14} {}",
                 builtin.name,
                 format!("{} arg(s)", builtin.arity),
                 builtin.description);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.reference {
        print_reference();
        return ExitCode::SUCCESS;
    }

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    match Preprocessor::new(config).and_then(|mut preprocessor| preprocessor.run()) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            error!(failed = summary.failed, "some files failed");
            ExitCode::FAILURE
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}
