use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A map of variables with case-insensitive names.
///
/// Used for the global layer, which lives for a whole run, and for the local
/// layer, which is reset for every file.
///
/// # Example
/// ```
/// use sift::{context::variables::Variables, interpreter::value::core::Value};
///
/// let mut vars = Variables::new();
/// vars.set("Debug", Value::Bool(true));
/// assert_eq!(vars.get("DEBUG"), Some(&Value::Bool(true)));
/// assert_eq!(vars.remove("debug"), Some(Value::Bool(true)));
/// assert!(vars.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, Value>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a variable, if it is set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&normalize_name(name))
    }

    /// Sets a variable and returns its previous value.
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.values.insert(normalize_name(name), value)
    }

    /// Removes a variable and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(&normalize_name(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&normalize_name(name))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order. Names are
    /// lower-cased.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<S: AsRef<str>> FromIterator<(S, Value)> for Variables {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(iter: T) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.set(name.as_ref(), value);
        }
        vars
    }
}

/// Lower-cases a variable name; all variable layers store names this way.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns `true` if `name` can be used as a variable name: a letter or `_`
/// followed by letters, digits, `_`, or `.`.
///
/// # Example
/// ```
/// use sift::context::variables::is_variable_name;
///
/// assert!(is_variable_name("env.home"));
/// assert!(is_variable_name("_debug2"));
/// assert!(!is_variable_name("2fast"));
/// assert!(!is_variable_name("a-b"));
/// ```
#[must_use]
pub fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
