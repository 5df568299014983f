//! Errors raised while configuring and driving a machine.

use thiserror::Error;

/// Build-time errors. All of them mean the machine definition is wrong, so
/// none is recoverable by retrying.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Machine has already started; the definition can no longer change")]
    AlreadyStarted,

    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    #[error("Transition from '{from}' on event '{event}' is already registered")]
    DuplicateTransition { from: String, event: String },

    #[error("Any-state transition on event '{event}' is already registered")]
    DuplicateAnyTransition { event: String },

    #[error("State '{state}' has no registered factory")]
    UnregisteredState { state: String },

    #[error("Start state already set to '{current}', cannot set it to '{requested}'")]
    StartStateAlreadySet { current: String, requested: String },
}

/// Errors returned from [`StateMachine::update`](crate::machine::StateMachine::update).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("No start state set. Call set_start_state before the first update")]
    NoStartState,

    #[error("More than {limit} transitions in a single update; stopped in state '{state}'")]
    TransitionLimitExceeded { limit: usize, state: String },
}

/// Errors from loading a [`MachineConfig`](crate::machine::MachineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid machine config: {0}")]
    Invalid(String),
}
