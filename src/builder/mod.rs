//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder that collects every configuration
//! error instead of stopping at the first, and the `id_enum!` macro for
//! declaring state keys and event ids with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
