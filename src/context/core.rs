use std::{path::Path, sync::Arc};

use crate::{
    context::{special::SpecialVariables, variables::{Variables, normalize_name}},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::usize_to_i64,
};

/// Names resolved from the file being processed.
pub const FILE_VARIABLES: &[&str] = &["__line__", "__file__", "__filename__", "__filefolder__"];

/// The position being processed, used to answer the file information names.
#[derive(Debug, Clone, Copy)]
pub struct FilePosition<'a> {
    pub path: &'a Path,
    pub line: usize,
}

/// A read-only view of every variable layer, in lookup priority order.
///
/// 1. Special-variable providers, selected by name prefix, and the file
///    information names `__line__`, `__file__`, `__filename__`,
///    `__filefolder__`.
/// 2. The local layer of the current file.
/// 3. The global layer of the run.
///
/// Expression evaluation is implemented on this type, so an expression always
/// sees exactly the layers the view was built with.
///
/// # Example
/// ```
/// use sift::{
///     context::{core::VariableContext, variables::Variables},
///     interpreter::value::core::Value,
/// };
///
/// let mut globals = Variables::new();
/// globals.set("mode", Value::from("release"));
/// let mut locals = Variables::new();
/// locals.set("mode", Value::from("debug"));
///
/// let context = VariableContext::new(&globals).with_locals(&locals);
/// assert_eq!(context.lookup("MODE"), Some(Value::from("debug")));
/// assert!(context.resolve("missing").is_err());
/// assert_eq!(context.unknown_as_false(true).resolve("missing").unwrap(), Value::Bool(false));
/// ```
#[derive(Clone, Copy)]
pub struct VariableContext<'a> {
    globals:          &'a Variables,
    locals:           Option<&'a Variables>,
    specials:         &'a [Arc<dyn SpecialVariables>],
    file:             Option<FilePosition<'a>>,
    unknown_as_false: bool,
}

impl<'a> VariableContext<'a> {
    /// Creates a view over the global layer only.
    #[must_use]
    pub const fn new(globals: &'a Variables) -> Self {
        Self { globals,
               locals: None,
               specials: &[],
               file: None,
               unknown_as_false: false }
    }

    /// Adds the local layer of the current file.
    #[must_use]
    pub const fn with_locals(mut self, locals: &'a Variables) -> Self {
        self.locals = Some(locals);
        self
    }

    /// Adds special-variable providers; earlier providers win on overlapping
    /// prefixes.
    #[must_use]
    pub const fn with_specials(mut self, specials: &'a [Arc<dyn SpecialVariables>]) -> Self {
        self.specials = specials;
        self
    }

    /// Sets the file and line answering the file information names.
    #[must_use]
    pub const fn with_file(mut self, path: &'a Path, line: usize) -> Self {
        self.file = Some(FilePosition { path, line });
        self
    }

    /// Makes unresolved names evaluate to `false` instead of failing.
    #[must_use]
    pub const fn unknown_as_false(mut self, enabled: bool) -> Self {
        self.unknown_as_false = enabled;
        self
    }

    /// Returns the provider that owns `name`, if any.
    #[must_use]
    pub fn provider_for(&self, name: &str) -> Option<&'a Arc<dyn SpecialVariables>> {
        self.specials.iter().find(|provider| provider.owns(name))
    }

    /// Looks a name up through every layer.
    ///
    /// A name in a provider's namespace is answered by the provider alone.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let name = normalize_name(name);

        if let Some(provider) = self.provider_for(&name) {
            return provider.get(&name);
        }
        if let Some(value) = self.file_variable(&name) {
            return Some(value);
        }
        if let Some(value) = self.locals.and_then(|locals| locals.get(&name)) {
            return Some(value.clone());
        }
        self.globals.get(&name).cloned()
    }

    /// Returns `true` if the name resolves in some layer. Ignores the
    /// unknown-as-false setting.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Resolves a variable reference during evaluation.
    ///
    /// # Errors
    /// `RuntimeError::UnresolvedVariable` if the name is not defined and
    /// unknown names are not treated as `false`.
    pub fn resolve(&self, name: &str) -> EvalResult<Value> {
        match self.lookup(name) {
            Some(value) => Ok(value),
            None if self.unknown_as_false => Ok(Value::Bool(false)),
            None => Err(RuntimeError::UnresolvedVariable { name: name.to_string() }),
        }
    }

    fn file_variable(&self, name: &str) -> Option<Value> {
        let file = self.file?;
        let text = |path: Option<&Path>| Value::Str(path.map(|p| p.display().to_string()).unwrap_or_default());

        match name {
            "__line__" => Some(Value::Integer(usize_to_i64(file.line))),
            "__file__" => Some(text(Some(file.path))),
            "__filename__" => Some(Value::Str(file.path
                                                  .file_name()
                                                  .map(|n| n.to_string_lossy().into_owned())
                                                  .unwrap_or_default())),
            "__filefolder__" => Some(text(file.path.parent())),
            _ => None,
        }
    }
}
