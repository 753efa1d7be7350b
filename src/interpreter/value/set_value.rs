use std::fmt;

use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// Enum representing values allowed in sets.
///
/// Mirrors [`Value`] with floats wrapped in `OrderedFloat`, which gives set
/// members a total equality. Nested sets compare without regard to order.
#[derive(Clone, Debug)]
pub enum SetValue {
    /// An integer such as `-4` or `42`.
    Integer(i64),
    /// A float such as `2.5`.
    Float(OrderedFloat<f32>),
    /// A string such as `"linux"`.
    Str(String),
    /// A boolean such as `true`.
    Bool(bool),
    /// A nested set.
    Set(Vec<SetValue>),
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => Self::same_members(a, b),
            _ => false,
        }
    }
}

impl Eq for SetValue {}

impl From<&Value> for SetValue {
    fn from(v: &Value) -> Self {
        v.clone().into()
    }
}

impl From<Value> for SetValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Integer(i) => Self::Integer(i),
            Value::Float(x) => Self::Float(OrderedFloat(x)),
            Value::Str(s) => Self::Str(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Set(members) => Self::Set(members),
        }
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        match s {
            SetValue::Integer(i) => Self::Integer(i),
            SetValue::Float(x) => Self::Float(x.into_inner()),
            SetValue::Str(s) => Self::Str(s),
            SetValue::Bool(b) => Self::Bool(b),
            SetValue::Set(members) => Self::Set(members),
        }
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{}", Value::from(other.clone())),
        }
    }
}

impl SetValue {
    /// Collects members in order, keeping only the first of any duplicates.
    pub fn collect_distinct(members: impl IntoIterator<Item = Self>) -> Vec<Self> {
        let mut distinct: Vec<Self> = Vec::new();
        for member in members {
            if !distinct.contains(&member) {
                distinct.push(member);
            }
        }
        distinct
    }

    /// Returns `true` if both slices hold the same members, in any order.
    #[must_use]
    pub fn same_members(left: &[Self], right: &[Self]) -> bool {
        left.len() == right.len() && left.iter().all(|m| right.contains(m))
    }

    /// Members of `left` followed by the members of `right` not already present.
    #[must_use]
    pub fn union(left: &[Self], right: &[Self]) -> Vec<Self> {
        Self::collect_distinct(left.iter().chain(right).cloned())
    }

    /// Members of `left` that also occur in `right`, in `left` order.
    #[must_use]
    pub fn intersect(left: &[Self], right: &[Self]) -> Vec<Self> {
        left.iter().filter(|m| right.contains(m)).cloned().collect()
    }

    /// Members of `left` that do not occur in `right`, in `left` order.
    #[must_use]
    pub fn diff(left: &[Self], right: &[Self]) -> Vec<Self> {
        left.iter().filter(|m| !right.contains(m)).cloned().collect()
    }
}
