/// Call targets.
///
/// Defines `Callable`, the common shape of native builtins and user-defined
/// functions, together with their arity contracts and the ordered clause list
/// that makes up a guarded multi-clause function.
pub mod callable;
/// The runtime value type.
///
/// Declares the `Value` enum, its type tags, typed extraction, equality and
/// display formatting.
pub mod core;
