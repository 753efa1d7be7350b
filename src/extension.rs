use std::path::Path;

use crate::interpreter::value::core::Value;

/// Handler for `#action` directives.
///
/// Receives the file being processed and the evaluated arguments of the
/// action, in order. Returning `false` fails the file with an extension
/// failure.
///
/// Any `Fn(&Path, &[Value]) -> bool` closure that is `Send + Sync` is an
/// extension.
///
/// # Example
/// ```
/// use std::{path::Path, sync::Arc};
///
/// use sift::{extension::Extension, interpreter::value::core::Value};
///
/// let only_strings: Arc<dyn Extension> =
///     Arc::new(|_: &Path, args: &[Value]| args.iter().all(|a| matches!(a, Value::Str(_))));
///
/// assert!(only_strings.process_action(Path::new("A.java"), &[Value::from("ok")]));
/// assert!(!only_strings.process_action(Path::new("A.java"), &[Value::from(1)]));
/// ```
pub trait Extension: Send + Sync {
    /// Processes one `#action`.
    fn process_action(&self, file: &Path, args: &[Value]) -> bool;
}

impl<F> Extension for F where F: Fn(&Path, &[Value]) -> bool + Send + Sync
{
    fn process_action(&self, file: &Path, args: &[Value]) -> bool {
        self(file, args)
    }
}
