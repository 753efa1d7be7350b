/// The layered variable view used during evaluation.
///
/// Combines special-variable providers, the built-in file information names,
/// the per-file local layer, and the run-wide global layer into a single
/// lookup with a fixed priority.
pub mod core;
/// Plain variable maps.
///
/// Defines the `Variables` map used for both the local and the global layer.
/// Names are case-insensitive.
pub mod variables;
/// Special-variable providers.
///
/// Defines the `SpecialVariables` trait for namespaces of variables owned by
/// an external source, and the built-in providers for environment variables
/// and shared read-write maps.
pub mod special;
