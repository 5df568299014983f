//! Runtime limits and policy switches for a machine.

use crate::machine::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration applied to a [`StateMachine`](crate::machine::StateMachine).
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```rust
/// use hfsm::machine::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_capacity": 0 }"#).unwrap();
/// assert_eq!(config.history_capacity, 0);
/// assert_eq!(config.max_queued_events, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Upper bound on transitions processed by one `update()` call. Guards
    /// against enter hooks that keep re-triggering each other.
    pub max_transitions_per_update: usize,

    /// Upper bound on pending events. Sends beyond it are rejected.
    pub max_queued_events: usize,

    /// Number of transition records kept. `0` disables recording.
    pub history_capacity: usize,

    /// Whether an any-state edge may re-enter the state that is already
    /// current. When off, such an edge is skipped for its own target.
    /// Specific self-edges always fire.
    pub allow_any_self_transition: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_transitions_per_update: 256,
            max_queued_events: 1024,
            history_capacity: 64,
            allow_any_self_transition: true,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every update or every send fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_transitions_per_update == 0 {
            return Err(ConfigError::Invalid(
                "max_transitions_per_update must be at least 1".to_string(),
            ));
        }
        if self.max_queued_events == 0 {
            return Err(ConfigError::Invalid(
                "max_queued_events must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the per-update transition limit.
    pub fn with_max_transitions_per_update(mut self, limit: usize) -> Self {
        self.max_transitions_per_update = limit;
        self
    }

    /// Set the event queue capacity.
    pub fn with_max_queued_events(mut self, limit: usize) -> Self {
        self.max_queued_events = limit;
        self
    }

    /// Set how many transition records are kept.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Allow or skip any-state edges into the current state.
    pub fn with_any_self_transition(mut self, allow: bool) -> Self {
        self.allow_any_self_transition = allow;
        self
    }
}
