use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    ast::Expr,
    config::PreprocessorConfig,
    context::{core::VariableContext, variables::Variables},
    directive::{
        registry::{DirectiveArgument, DirectiveDef, Flow, ShapeError, lookup_directive},
        state::{NestingError, NestingStack},
    },
    error::{ExpressionError, Location, PreprocessError, RuntimeError},
    interpreter::value::core::Value,
    pipeline::{
        comments::CommentStripper,
        file::FileOutput,
        line::{LineKind, classify, substitute},
    },
};

/// Deepest allowed chain of nested `#include` directives.
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// Which variable layer an assignment writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Global,
}

/// A file, or an included file, being read line by line.
#[derive(Debug)]
struct SourceCursor {
    path:       PathBuf,
    lines:      Vec<String>,
    next:       usize,
    /// Nesting depth when the source was entered; it must be back here when
    /// the source ends.
    base_depth: usize,
}

impl SourceCursor {
    fn new(path: PathBuf, text: &str, base_depth: usize) -> Self {
        Self { path,
               lines: text.lines().map(str::to_string).collect(),
               next: 0,
               base_depth }
    }

    /// Returns the next line with its one-based number.
    fn advance(&mut self) -> Option<(usize, String)> {
        let text = self.lines.get(self.next)?.clone();
        self.next += 1;
        Some((self.next, text))
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.next
    }
}

/// The state of one file being processed.
///
/// Created fresh for every file: local variables and the nesting stack never
/// leak from one file into the next, while the global layer is borrowed from
/// the run.
pub struct Session<'a> {
    pub(crate) config:  &'a PreprocessorConfig,
    pub(crate) globals: &'a mut Variables,
    pub(crate) locals:  Variables,
    pub(crate) nesting: NestingStack,
    sources:            Vec<SourceCursor>,
    output:             Vec<String>,
    comments:           CommentStripper,
    comment_opened:     Option<Location>,
    current:            Location,
    ends_with_eol:      bool,
}

impl<'a> Session<'a> {
    pub(crate) fn new(config: &'a PreprocessorConfig,
                      globals: &'a mut Variables,
                      path: &Path,
                      text: &str)
                      -> Self {
        Self { config,
               globals,
               locals: Variables::new(),
               nesting: NestingStack::default(),
               sources: vec![SourceCursor::new(path.to_path_buf(), text, 0)],
               output: Vec::new(),
               comments: CommentStripper::default(),
               comment_opened: None,
               current: Location { file: path.to_path_buf(),
                                   line: 0,
                                   text: String::new() },
               ends_with_eol: text.is_empty() || text.ends_with('\n') }
    }

    /// Processes every line of the file and of the files it includes.
    pub(crate) fn run(mut self) -> Result<FileOutput, PreprocessError> {
        while let Some(cursor) = self.sources.last_mut() {
            let Some((line, text)) = cursor.advance() else {
                self.close_source()?;
                continue;
            };
            self.current = Location { file: cursor.path.clone(),
                                      line,
                                      text };

            let text = self.current.text.clone();
            match self.process_line(&text)? {
                Flow::Continue => {},
                Flow::ExitSource => self.exit_source(),
                Flow::ExcludeFile => {
                    debug!(file = %self.current.file.display(), "file excluded");
                    return Ok(FileOutput::Excluded);
                },
            }
        }

        if self.comments.in_block_comment()
           && let Some(opened) = &self.comment_opened
        {
            warn!(location = %opened, "block comment never closed, text after it was dropped");
        }
        Ok(FileOutput::Text(self.render()))
    }

    fn process_line(&mut self, line: &str) -> Result<Flow, PreprocessError> {
        match classify(line, self.config.allow_whitespace_before_directive) {
            LineKind::Directive { keyword, tail } => {
                self.skip_line();
                self.dispatch(keyword, tail)
            },
            LineKind::Uncomment { indent,
                                  marker_len,
                                  text,
                                  substitute: with_substitution, } => {
                if self.is_active() {
                    let body = if with_substitution { self.substitute(text)? } else { text.to_string() };
                    let marker = if self.config.preserve_indentation { " ".repeat(marker_len) } else { String::new() };
                    self.output.push(format!("{indent}{marker}{body}"));
                } else {
                    self.skip_line();
                }
                Ok(Flow::Continue)
            },
            LineKind::Text => {
                if self.is_active() {
                    let text = self.substitute(line)?;
                    self.emit(text);
                } else {
                    self.skip_line();
                }
                Ok(Flow::Continue)
            },
        }
    }

    fn dispatch(&mut self, keyword: &str, tail: &str) -> Result<Flow, PreprocessError> {
        let Some(def) = lookup_directive(keyword) else {
            if self.is_active() {
                return Err(PreprocessError::UnknownDirective { location: self.location(),
                                                               name:     keyword.to_string(), });
            }
            return Ok(Flow::Continue);
        };

        if !def.conditional && !self.is_active() {
            return Ok(Flow::Continue);
        }

        debug!(directive = def.name,
               file = %self.current.file.display(),
               line = self.current.line,
               "directive");

        (def.handler)(self, def, tail)
    }

    /// Emits a line of ordinary text, removing comments unless they are kept.
    fn emit(&mut self, text: String) {
        if self.config.keep_comments {
            self.output.push(text);
            return;
        }

        let was_open = self.comments.in_block_comment();
        let stripped = self.comments.strip(&text);
        if !was_open && self.comments.in_block_comment() {
            self.comment_opened = Some(self.location());
        }
        if stripped.trim().is_empty() && !text.trim().is_empty() {
            self.skip_line();
        } else {
            self.output.push(stripped);
        }
    }

    /// Accounts for a line that produces no output.
    fn skip_line(&mut self) {
        if self.config.keep_lines {
            self.output.push(String::new());
        }
    }

    fn close_source(&mut self) -> Result<(), PreprocessError> {
        let Some(cursor) = self.sources.pop() else {
            return Ok(());
        };

        if self.nesting.depth() > cursor.base_depth
           && let Some(frame) = self.nesting.innermost()
        {
            return Err(PreprocessError::UnbalancedDirective { location: frame.opened.clone(),
                                                              details:  "#if without matching #endif".to_string(), });
        }
        Ok(())
    }

    fn exit_source(&mut self) {
        if let Some(cursor) = self.sources.pop() {
            self.nesting.truncate(cursor.base_depth);
            if self.sources.is_empty() && self.config.keep_lines {
                self.output.extend(std::iter::repeat_n(String::new(), cursor.remaining()));
            }
        }
    }

    fn render(self) -> String {
        let eol = self.config.eol.as_str();
        let mut text = self.output.join(eol);
        let drop_final_eol = self.config.care_for_trailing_eol && !self.ends_with_eol;

        if !self.output.is_empty() && !drop_final_eol {
            text.push_str(eol);
        }
        text
    }

    /// Returns `true` if lines are currently emitted.
    pub(crate) fn is_active(&self) -> bool {
        self.nesting.is_active()
    }

    /// Number of `#if` frames opened by the source being read. Frames of an
    /// includer cannot be closed from an included file.
    pub(crate) fn open_frames(&self) -> usize {
        let base = self.sources.last().map_or(0, |cursor| cursor.base_depth);
        self.nesting.depth().saturating_sub(base)
    }

    /// The line being processed.
    pub(crate) fn location(&self) -> Location {
        self.current.clone()
    }

    /// The file the current line belongs to.
    pub(crate) fn current_file(&self) -> &Path {
        &self.current.file
    }

    /// A view of every variable layer, as seen from the current line.
    pub(crate) fn variables(&self) -> VariableContext<'_> {
        VariableContext::new(self.globals).with_locals(&self.locals)
                                          .with_specials(&self.config.special_variables)
                                          .with_file(&self.current.file, self.current.line)
                                          .unknown_as_false(self.config.unknown_variable_as_false)
    }

    /// Decodes the directive argument and picks the part the handler needs.
    pub(crate) fn argument<T>(&self,
                              def: &DirectiveDef,
                              tail: &str,
                              pick: impl FnOnce(DirectiveArgument) -> Option<T>)
                              -> Result<T, PreprocessError> {
        let argument = def.shape.decode(tail).map_err(|e| match e {
                                                 ShapeError::Parse(source) => self.expression_error(source.into()),
                                                 ShapeError::Malformed(details) => self.malformed(details),
                                             })?;

        pick(argument).ok_or_else(|| self.malformed(format!("unexpected argument for #{}", def.name)))
    }

    pub(crate) fn evaluate(&self, expr: &Expr) -> Result<Value, PreprocessError> {
        self.variables()
            .eval(expr)
            .map_err(|e| self.expression_error(e.into()))
    }

    /// Evaluates a condition, which must be a boolean.
    pub(crate) fn condition(&self, expr: &Expr) -> Result<bool, PreprocessError> {
        self.evaluate(expr)?
            .as_bool()
            .map_err(|e| self.expression_error(e.into()))
    }

    pub(crate) fn substitute(&self, text: &str) -> Result<String, PreprocessError> {
        substitute(text, &self.variables()).map_err(|e| self.expression_error(e))
    }

    /// Writes a variable, routing names owned by a provider to the provider.
    pub(crate) fn assign(&mut self, scope: Scope, name: &str, value: Value) -> Result<(), PreprocessError> {
        let config = self.config;
        if let Some(provider) = config.special_variables.iter().find(|p| p.owns(name)) {
            return provider.set(&name.to_lowercase(), value).map_err(|details| {
                                                                 self.runtime_error(RuntimeError::ReadOnlyVariable { name: name.to_string(),
                                                                                                                     details })
                                                             });
        }

        match scope {
            Scope::Local => self.locals.set(name, value),
            Scope::Global => self.globals.set(name, value),
        };
        Ok(())
    }

    /// Removes a local variable, or else a global one.
    pub(crate) fn undefine(&mut self, name: &str) -> Result<(), PreprocessError> {
        if self.config.special_variables.iter().any(|p| p.owns(name)) {
            return Err(self.runtime_error(RuntimeError::ReadOnlyVariable { name:    name.to_string(),
                                                                           details: "provider variables cannot be removed".to_string(), }));
        }
        if self.locals.remove(name).is_some() || self.globals.remove(name).is_some() {
            return Ok(());
        }
        Err(self.runtime_error(RuntimeError::UnresolvedVariable { name: name.to_string() }))
    }

    /// Starts reading an included file; its lines are processed before the
    /// rest of the current file.
    pub(crate) fn include(&mut self, target: &str) -> Result<(), PreprocessError> {
        if self.sources.len() > MAX_INCLUDE_DEPTH {
            return Err(PreprocessError::IncludeDepth { location: self.location(),
                                                       depth:    MAX_INCLUDE_DEPTH, });
        }

        let path = self.current_file()
                       .parent()
                       .map_or_else(|| PathBuf::from(target), |folder| folder.join(target));
        let text = fs::read_to_string(&path).map_err(|source| PreprocessError::Include { location: self.location(),
                                                                                          path: path.clone(),
                                                                                          source })?;

        debug!(file = %path.display(), depth = self.sources.len(), "include");
        self.sources.push(SourceCursor::new(path, &text, self.nesting.depth()));
        Ok(())
    }

    pub(crate) fn nesting_error(&self, error: NestingError) -> PreprocessError {
        PreprocessError::UnbalancedDirective { location: self.location(),
                                               details:  error.describe().to_string(), }
    }

    pub(crate) fn malformed(&self, details: impl Into<String>) -> PreprocessError {
        PreprocessError::MalformedDirective { location: self.location(),
                                              details:  details.into(), }
    }

    pub(crate) fn runtime_error(&self, error: RuntimeError) -> PreprocessError {
        self.expression_error(error.into())
    }

    pub(crate) fn expression_error(&self, source: ExpressionError) -> PreprocessError {
        PreprocessError::Expression { location: self.location(),
                                      source }
    }
}
