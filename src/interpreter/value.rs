/// Set member representation.
///
/// Defines the `SetValue` type used for the members of a `Value::Set`. Set
/// members compare with total equality, so a set never holds two members that
/// are indistinguishable, floating-point `NaN` included.
///
/// This module also provides the membership and combination helpers behind the
/// `contains`, `union`, `intersect`, and `diff` builtins.
pub mod set_value;

pub mod core;
