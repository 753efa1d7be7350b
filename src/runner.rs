use std::{
    fs, io,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::PreprocessorConfig,
    context::variables::Variables,
    error::PreprocessError,
    pipeline::file::{FileOutput, FilePipeline},
};

/// Counts of what a run did with each file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files preprocessed and written.
    pub processed: usize,
    /// Files copied byte for byte.
    pub copied:    usize,
    /// Files whose destination already had the same content.
    pub unchanged: usize,
    /// Files with an excluded extension, or excluded by `#excludeif`.
    pub excluded:  usize,
    /// Files that failed while failures were being ignored.
    pub failed:    usize,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Processed,
    Copied,
    Unchanged,
    Excluded,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Processed => self.processed += 1,
            Outcome::Copied => self.copied += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Excluded => self.excluded += 1,
        }
    }
}

/// Drives a whole run: walks the source roots and preprocesses, copies, or
/// skips each file into the destination tree.
///
/// The global variable layer is built once from the configuration and
/// shared by every file of the run, in walk order.
///
/// # Example
/// ```no_run
/// use sift::{config::PreprocessorConfig, runner::Preprocessor};
///
/// let config = PreprocessorConfig { sources: vec!["src".into()],
///                                   destination: "target/preprocessed".into(),
///                                   ..PreprocessorConfig::default() };
/// let summary = Preprocessor::new(config)?.run()?;
/// println!("{} files preprocessed", summary.processed);
/// # Ok::<(), sift::error::PreprocessError>(())
/// ```
#[derive(Debug)]
pub struct Preprocessor {
    config:   PreprocessorConfig,
    globals:  Variables,
    patterns: Vec<Pattern>,
}

impl Preprocessor {
    /// Validates the configuration and loads the global layer.
    ///
    /// # Errors
    /// `PreprocessError::Config` for invalid settings, and
    /// `PreprocessError::Io` for unreadable config files.
    pub fn new(config: PreprocessorConfig) -> Result<Self, PreprocessError> {
        config.validate()?;
        let globals = config.load_globals()?;
        let patterns = config.folder_patterns()?;

        Ok(Self { config,
                  globals,
                  patterns })
    }

    #[must_use]
    pub const fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// The global layer, including writes made by `#global` so far.
    #[must_use]
    pub const fn globals(&self) -> &Variables {
        &self.globals
    }

    /// Processes every source root.
    ///
    /// # Errors
    /// The first file or I/O failure, unless `ignore_missing_sources` is
    /// set, in which case failed files are only logged and counted.
    pub fn run(&mut self) -> Result<RunSummary, PreprocessError> {
        let mut summary = RunSummary::default();

        if self.config.clear_destination {
            self.clear_destination()?;
        }

        let roots = self.config.sources.clone();
        for root in &roots {
            if !root.exists() {
                if self.config.ignore_missing_sources {
                    warn!(root = %root.display(), "source root not found, skipped");
                    continue;
                }
                return Err(PreprocessError::io(root,
                                               io::Error::new(io::ErrorKind::NotFound, "source root not found")));
            }

            for (source, relative) in self.collect_files(root)? {
                match self.process(&source, &relative) {
                    Ok(outcome) => summary.record(outcome),
                    Err(e) if self.config.ignore_missing_sources => {
                        warn!(file = %source.display(), "{e}");
                        summary.failed += 1;
                    },
                    Err(e) => return Err(e),
                }
            }
        }

        info!(processed = summary.processed,
              copied = summary.copied,
              unchanged = summary.unchanged,
              excluded = summary.excluded,
              failed = summary.failed,
              "run finished");
        Ok(summary)
    }

    /// Lists the files of a root with their paths relative to it, skipping
    /// excluded folders. A root that is a file yields just that file.
    fn collect_files(&self, root: &Path) -> Result<Vec<(PathBuf, PathBuf)>, PreprocessError> {
        if root.is_file() {
            let name = root.file_name().map(PathBuf::from).unwrap_or_default();
            return Ok(vec![(root.to_path_buf(), name)]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root).sort_by_file_name()
                                       .into_iter()
                                       .filter_entry(|entry| !self.is_excluded_folder(root, entry));
        for entry in walker {
            let entry = entry.map_err(|e| {
                                 let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                                 PreprocessError::io(path, e.into())
                             })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path()
                                .strip_prefix(root)
                                .map_or_else(|_| PathBuf::from(entry.file_name()), Path::to_path_buf);
            files.push((entry.into_path(), relative));
        }
        Ok(files)
    }

    fn is_excluded_folder(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            return false;
        };

        let excluded = self.patterns.iter().any(|pattern| pattern.matches_path(relative));
        if excluded {
            debug!(folder = %relative.display(), "folder excluded");
        }
        excluded
    }

    fn process(&mut self, source: &Path, relative: &Path) -> Result<Outcome, PreprocessError> {
        if self.config.is_excluded_file(source) {
            self.progress("excluded", source);
            return Ok(Outcome::Excluded);
        }

        let target = self.config.destination.join(relative);

        if self.config.is_preprocessed(source) {
            let output = FilePipeline::new(&self.config, &mut self.globals).process_file(source)?;
            let FileOutput::Text(text) = output else {
                self.progress("excluded by directive", source);
                return Ok(Outcome::Excluded);
            };

            self.progress("preprocessing", source);
            return Ok(if self.write(source, &target, text.as_bytes())? { Outcome::Processed } else { Outcome::Unchanged });
        }

        let bytes = fs::read(source).map_err(|e| PreprocessError::io(source, e))?;
        self.progress("copying", source);
        Ok(if self.write(source, &target, &bytes)? { Outcome::Copied } else { Outcome::Unchanged })
    }

    /// Writes `bytes` to `target`. Returns `false` when the write was
    /// skipped because the target already holds the same bytes.
    fn write(&self, source: &Path, target: &Path, bytes: &[u8]) -> Result<bool, PreprocessError> {
        if self.config.skip_unchanged
           && let Ok(existing) = fs::read(target)
           && existing == bytes
        {
            debug!(file = %target.display(), "unchanged");
            return Ok(false);
        }
        if self.config.dry_run {
            return Ok(true);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PreprocessError::io(parent, e))?;
        }
        fs::write(target, bytes).map_err(|e| PreprocessError::io(target, e))?;

        if self.config.keep_attributes {
            let permissions = fs::metadata(source).map_err(|e| PreprocessError::io(source, e))?
                                                  .permissions();
            fs::set_permissions(target, permissions).map_err(|e| PreprocessError::io(target, e))?;
        }
        Ok(true)
    }

    fn clear_destination(&self) -> Result<(), PreprocessError> {
        let destination = &self.config.destination;
        if !destination.exists() {
            return Ok(());
        }

        self.progress("clearing", destination);
        if self.config.dry_run {
            return Ok(());
        }
        fs::remove_dir_all(destination).map_err(|e| PreprocessError::io(destination, e))
    }

    fn progress(&self, action: &str, path: &Path) {
        if self.config.verbose {
            info!(file = %path.display(), "{action}");
        } else {
            debug!(file = %path.display(), "{action}");
        }
    }
}
