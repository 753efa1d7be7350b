use std::{fmt, fs, path::{Path, PathBuf}, sync::Arc};

use glob::Pattern;

use crate::{
    context::{special::SpecialVariables, variables::{Variables, is_variable_name}},
    error::PreprocessError,
    extension::Extension,
    interpreter::value::core::Value,
};

/// File extensions preprocessed when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["java", "txt", "htm", "html"];
/// File extensions neither preprocessed nor copied when none are configured.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["xml"];
/// The only supported text encoding.
pub const UTF_8: &str = "UTF-8";

/// Everything a preprocessing run needs, fixed for the duration of the run.
///
/// # Example
/// ```
/// use sift::config::PreprocessorConfig;
///
/// let config = PreprocessorConfig { keep_lines: true,
///                                   ..PreprocessorConfig::default() };
/// assert_eq!(config.eol, "\n");
/// assert!(config.is_preprocessed("src/Main.JAVA".as_ref()));
/// assert!(config.is_excluded_file("pom.xml".as_ref()));
/// ```
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct PreprocessorConfig {
    /// Source roots: folders walked recursively, or single files.
    pub sources:                          Vec<PathBuf>,
    /// Folder receiving the output tree.
    pub destination:                      PathBuf,
    /// Encoding of source files; only UTF-8 is supported.
    pub source_encoding:                  String,
    /// Encoding of written files; only UTF-8 is supported.
    pub destination_encoding:             String,
    /// Line terminator written after each output line.
    pub eol:                              String,
    /// Extensions of files to preprocess, without the dot.
    pub extensions:                       Vec<String>,
    /// Extensions of files to leave out of the output entirely.
    pub excluded_extensions:              Vec<String>,
    /// Glob patterns of folders to skip, relative to their source root.
    pub excluded_folders:                 Vec<String>,
    /// `name=value` files loaded into the global layer, in order.
    pub config_files:                     Vec<PathBuf>,
    /// Initial global variables, applied before the config files.
    pub global_variables:                 Vec<(String, Value)>,
    /// Keep `//` and `/* */` comments in preprocessed output.
    pub keep_comments:                    bool,
    /// Replace directive and suppressed lines by empty lines.
    pub keep_lines:                       bool,
    /// Log every processed file at info level.
    pub verbose:                          bool,
    /// Do everything except writing to the destination.
    pub dry_run:                          bool,
    /// Empty the destination folder before the run.
    pub clear_destination:                bool,
    /// Omit the final line terminator when the source has none.
    pub care_for_trailing_eol:            bool,
    /// Accept whitespace between `//` and `#` of a directive.
    pub allow_whitespace_before_directive: bool,
    /// Replace `//$` and `//$$` markers by spaces instead of removing them.
    pub preserve_indentation:             bool,
    /// Copy file permissions from source to destination.
    pub keep_attributes:                  bool,
    /// Evaluate unresolved variable names as `false`.
    pub unknown_variable_as_false:        bool,
    /// Leave destination files alone when their content would not change.
    pub skip_unchanged:                   bool,
    /// Skip missing source roots and continue past failed files.
    pub ignore_missing_sources:           bool,
    /// Providers of special variables, consulted in order.
    pub special_variables:                Vec<Arc<dyn SpecialVariables>>,
    /// Handler for `#action` directives.
    pub extension:                        Option<Arc<dyn Extension>>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self { sources:                          Vec::new(),
               destination:                      PathBuf::from("preprocessed"),
               source_encoding:                  UTF_8.to_string(),
               destination_encoding:             UTF_8.to_string(),
               eol:                              "\n".to_string(),
               extensions:                       to_strings(DEFAULT_EXTENSIONS),
               excluded_extensions:              to_strings(DEFAULT_EXCLUDED_EXTENSIONS),
               excluded_folders:                 Vec::new(),
               config_files:                     Vec::new(),
               global_variables:                 Vec::new(),
               keep_comments:                    false,
               keep_lines:                       false,
               verbose:                          false,
               dry_run:                          false,
               clear_destination:                false,
               care_for_trailing_eol:            false,
               allow_whitespace_before_directive: false,
               preserve_indentation:             false,
               keep_attributes:                  false,
               unknown_variable_as_false:        false,
               skip_unchanged:                   false,
               ignore_missing_sources:           false,
               special_variables:                Vec::new(),
               extension:                        None, }
    }
}

impl fmt::Debug for PreprocessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefixes: Vec<&str> = self.special_variables.iter().map(|p| p.prefix()).collect();

        f.debug_struct("PreprocessorConfig")
         .field("sources", &self.sources)
         .field("destination", &self.destination)
         .field("source_encoding", &self.source_encoding)
         .field("destination_encoding", &self.destination_encoding)
         .field("eol", &self.eol)
         .field("extensions", &self.extensions)
         .field("excluded_extensions", &self.excluded_extensions)
         .field("excluded_folders", &self.excluded_folders)
         .field("config_files", &self.config_files)
         .field("global_variables", &self.global_variables)
         .field("keep_comments", &self.keep_comments)
         .field("keep_lines", &self.keep_lines)
         .field("verbose", &self.verbose)
         .field("dry_run", &self.dry_run)
         .field("clear_destination", &self.clear_destination)
         .field("care_for_trailing_eol", &self.care_for_trailing_eol)
         .field("allow_whitespace_before_directive", &self.allow_whitespace_before_directive)
         .field("preserve_indentation", &self.preserve_indentation)
         .field("keep_attributes", &self.keep_attributes)
         .field("unknown_variable_as_false", &self.unknown_variable_as_false)
         .field("skip_unchanged", &self.skip_unchanged)
         .field("ignore_missing_sources", &self.ignore_missing_sources)
         .field("special_variables", &prefixes)
         .field("extension", &self.extension.is_some())
         .finish()
    }
}

impl PreprocessorConfig {
    /// Checks the settings that can be validated before touching any file.
    ///
    /// # Errors
    /// `PreprocessError::Config` for a non-UTF-8 encoding, an empty line
    /// terminator, an invalid folder pattern, or an invalid global variable
    /// name.
    pub fn validate(&self) -> Result<(), PreprocessError> {
        for (what, label) in [("source", &self.source_encoding), ("destination", &self.destination_encoding)] {
            if !is_utf8_label(label) {
                return Err(PreprocessError::config(format!("unsupported {what} encoding '{label}', only {UTF_8} is supported")));
            }
        }
        if self.eol.is_empty() {
            return Err(PreprocessError::config("the line terminator must not be empty"));
        }
        self.folder_patterns()?;
        if let Some((name, _)) = self.global_variables.iter().find(|(name, _)| !is_variable_name(name)) {
            return Err(PreprocessError::config(format!("'{name}' is not a valid variable name")));
        }
        Ok(())
    }

    /// Compiles the excluded folder patterns.
    ///
    /// # Errors
    /// `PreprocessError::Config` naming the first invalid pattern.
    pub fn folder_patterns(&self) -> Result<Vec<Pattern>, PreprocessError> {
        self.excluded_folders
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| PreprocessError::config(format!("invalid folder pattern '{raw}': {e}")))
            })
            .collect()
    }

    /// Returns `true` if the file's extension is on the preprocess list.
    #[must_use]
    pub fn is_preprocessed(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }

    /// Returns `true` if the file's extension is on the exclusion list.
    #[must_use]
    pub fn is_excluded_file(&self, path: &Path) -> bool {
        has_extension(path, &self.excluded_extensions)
    }

    /// Builds the global layer: the configured variables first, then each
    /// config file in order, later assignments winning.
    ///
    /// # Errors
    /// `PreprocessError::Io` if a config file cannot be read, and
    /// `PreprocessError::Config` if one is malformed.
    pub fn load_globals(&self) -> Result<Variables, PreprocessError> {
        let mut globals: Variables = self.global_variables.iter().map(|(name, value)| (name, value.clone())).collect();

        for path in &self.config_files {
            let text = fs::read_to_string(path).map_err(|e| PreprocessError::io(path, e))?;
            for (name, value) in parse_config_file(&text, path)? {
                globals.set(&name, value);
            }
        }

        Ok(globals)
    }
}

/// Parses the text of a config file into `(name, value)` pairs.
///
/// Each line is `name=value`; values are recognised with
/// [`Value::recognize`]. Blank lines and lines starting with `#` are ignored.
///
/// # Errors
/// `PreprocessError::Config` naming the file and line of the first line
/// without `=` or with an invalid name.
///
/// # Example
/// ```
/// use sift::{config::parse_config_file, interpreter::value::core::Value};
///
/// let text = "# build settings\nversion = 12\nvendor=\"acme\"\n\ndebug=false\n";
/// let pairs = parse_config_file(text, "build.cfg".as_ref()).unwrap();
/// assert_eq!(pairs,
///            vec![("version".to_string(), Value::Integer(12)),
///                 ("vendor".to_string(), Value::from("acme")),
///                 ("debug".to_string(), Value::Bool(false))]);
///
/// assert!(parse_config_file("no equals sign", "bad.cfg".as_ref()).is_err());
/// ```
pub fn parse_config_file(text: &str, path: &Path) -> Result<Vec<(String, Value)>, PreprocessError> {
    let mut pairs = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, raw)) = line.split_once('=') else {
            return Err(PreprocessError::config(format!("{}:{}: expected 'name=value', found '{line}'",
                                                       path.display(),
                                                       index + 1)));
        };
        let name = name.trim();
        if !is_variable_name(name) {
            return Err(PreprocessError::config(format!("{}:{}: '{name}' is not a valid variable name",
                                                       path.display(),
                                                       index + 1)));
        }

        pairs.push((name.to_string(), Value::recognize(raw.trim())));
    }

    Ok(pairs)
}

/// Returns `true` for the accepted spellings of UTF-8.
#[must_use]
pub fn is_utf8_label(label: &str) -> bool {
    matches!(label.trim().to_ascii_lowercase().as_str(), "utf-8" | "utf8")
}

fn has_extension(path: &Path, list: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| list.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
