use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{
    context::variables::normalize_name,
    interpreter::value::core::Value,
};

/// A namespace of variables owned by an external source.
///
/// A provider owns every name that starts with its prefix: lookups of such
/// names never fall through to the local or global layer, and writes go to
/// the provider. Names handed to `get` and `set` are lower-cased and include
/// the prefix.
pub trait SpecialVariables: Send + Sync {
    /// The lower-case prefix of every name this provider owns, such as
    /// `env.`.
    fn prefix(&self) -> &str;

    /// The full names this provider currently defines.
    fn names(&self) -> Vec<String>;

    /// Returns the value of a name, or `None` if the provider does not define
    /// it.
    fn get(&self, name: &str) -> Option<Value>;

    /// Writes a value. Read-only providers keep this default, which refuses
    /// with a reason.
    ///
    /// # Errors
    /// A human-readable reason when the write is refused.
    fn set(&self, name: &str, value: Value) -> Result<(), String> {
        let _ = value;
        Err(format!("'{name}' is provided by a read-only source"))
    }

    /// Returns `true` if `name` falls in this provider's namespace.
    fn owns(&self, name: &str) -> bool {
        normalize_name(name).starts_with(&self.prefix().to_lowercase())
    }
}

/// Read-only snapshot of the process environment under the `env.` prefix.
///
/// Keys are lower-cased, so `HOME` is read as `env.home`. Values go through
/// [`Value::recognize`], so `env.jobs` may be an integer.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentVariables {
    values: HashMap<String, Value>,
}

impl EnvironmentVariables {
    pub const PREFIX: &'static str = "env.";

    /// Captures the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Builds the provider from explicit `(key, raw value)` pairs.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     context::special::{EnvironmentVariables, SpecialVariables},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let env = EnvironmentVariables::from_pairs([("JOBS", "4")]);
    /// assert_eq!(env.get("env.jobs"), Some(Value::Integer(4)));
    /// assert!(env.set("env.jobs", Value::Integer(8)).is_err());
    /// ```
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
        where K: AsRef<str>,
              V: AsRef<str>
    {
        let values = pairs.into_iter()
                          .map(|(key, value)| {
                              (format!("{}{}", Self::PREFIX, normalize_name(key.as_ref())),
                               Value::recognize(value.as_ref()))
                          })
                          .collect();
        Self { values }
    }
}

impl SpecialVariables for EnvironmentVariables {
    fn prefix(&self) -> &str {
        Self::PREFIX
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(&normalize_name(name)).cloned()
    }
}

/// A read-write provider backed by an in-memory map.
///
/// Lets an embedding application expose a namespace that directives can
/// both read and write, for example values an extension consumes after the
/// run.
#[derive(Debug, Default)]
pub struct SharedVariables {
    prefix: String,
    values: RwLock<HashMap<String, Value>>,
}

impl SharedVariables {
    /// Creates an empty provider owning names that start with `prefix`.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     context::special::{SharedVariables, SpecialVariables},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let build = SharedVariables::new("build.");
    /// build.set("build.number", Value::Integer(12)).unwrap();
    /// assert_eq!(build.get("BUILD.NUMBER"), Some(Value::Integer(12)));
    /// ```
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_lowercase(),
               values: RwLock::default(), }
    }
}

impl SpecialVariables for SharedVariables {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn names(&self) -> Vec<String> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = values.keys().cloned().collect();
        names.sort();
        names
    }

    fn get(&self, name: &str) -> Option<Value> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(&normalize_name(name)).cloned()
    }

    fn set(&self, name: &str, value: Value) -> Result<(), String> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(normalize_name(name), value);
        Ok(())
    }
}
