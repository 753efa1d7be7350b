use std::{fs, path::Path};

use crate::{
    config::PreprocessorConfig,
    context::variables::Variables,
    error::PreprocessError,
    pipeline::session::Session,
};

/// The result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutput {
    /// The preprocessed text.
    Text(String),
    /// An `#excludeif` held; nothing is written for the file.
    Excluded,
}

impl FileOutput {
    /// Returns the text, or `None` for an excluded file.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Excluded => None,
        }
    }
}

/// Processes files against one configuration and one global variable layer.
///
/// Globals written by `#global` in one file are visible to every file
/// processed afterwards through the same pipeline.
///
/// # Example
/// ```
/// use sift::{
///     config::PreprocessorConfig,
///     context::variables::Variables,
///     interpreter::value::core::Value,
///     pipeline::file::FilePipeline,
/// };
///
/// let config = PreprocessorConfig::default();
/// let mut globals: Variables = [("debug", Value::Bool(false))].into_iter().collect();
/// let source = "//#if debug\nlog();\n//#else\n//$run();\n//#endif\n";
///
/// let output = FilePipeline::new(&config, &mut globals).process_str("Main.java".as_ref(), source)
///                                                      .unwrap();
/// assert_eq!(output.text(), Some("run();\n"));
/// ```
pub struct FilePipeline<'a> {
    config:  &'a PreprocessorConfig,
    globals: &'a mut Variables,
}

impl<'a> FilePipeline<'a> {
    #[must_use]
    pub fn new(config: &'a PreprocessorConfig, globals: &'a mut Variables) -> Self {
        Self { config, globals }
    }

    /// The global layer, including writes made by processed files.
    #[must_use]
    pub fn globals(&self) -> &Variables {
        self.globals
    }

    /// Processes `text` as the content of the file at `path`. The path
    /// answers the file information variables and anchors relative
    /// includes.
    ///
    /// # Errors
    /// The first [`PreprocessError`] raised by a line of the file or of a
    /// file it includes.
    pub fn process_str(&mut self, path: &Path, text: &str) -> Result<FileOutput, PreprocessError> {
        Session::new(self.config, self.globals, path, text).run()
    }

    /// Reads and processes a UTF-8 file.
    ///
    /// # Errors
    /// `PreprocessError::Io` if the file cannot be read, otherwise as
    /// [`process_str`](Self::process_str).
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutput, PreprocessError> {
        let text = fs::read_to_string(path).map_err(|e| PreprocessError::io(path, e))?;
        self.process_str(path, &text)
    }
}
