//! Core state machine types.
//!
//! This module contains the building blocks the engine is generic over:
//! - Identifiers for state keys and events via the `Id` trait
//! - The `State` lifecycle trait
//! - Guard predicates for transition control
//! - Bounded transition history

mod guard;
mod history;
mod id;
mod state;

pub use guard::Guard;
pub use history::{Route, TransitionHistory, TransitionRecord};
pub use id::Id;
pub use state::State;
