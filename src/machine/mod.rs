//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **StateMachine**: owns the context, the transition table, the state
//!   instances and the event queue; driven by `update()`
//! - **Scope**: what a state hook sees of its machine
//! - **SubMachine**: an inner machine owned and ticked by an outer state
//! - **MachineConfig**: limits and policy switches

mod config;
mod engine;
mod error;
mod nested;
mod queue;
mod registry;
mod scope;
mod table;

pub use config::MachineConfig;
pub use engine::StateMachine;
pub use error::{ConfigError, ConfigurationError, MachineError};
pub use nested::{MachineFactory, SubMachine};
pub use registry::{BoxedState, StateFactory};
pub use scope::{Phase, Scope};
