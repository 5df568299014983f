//! Build errors for the fluent machine builder.

use crate::machine::{ConfigError, ConfigurationError};
use thiserror::Error;

/// Errors that can occur when building a machine with
/// [`MachineBuilder`](crate::builder::MachineBuilder).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(state) before .build()")]
    MissingStartState,

    #[error("Invalid machine definition: {}", join(.0))]
    Invalid(Vec<ConfigurationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ConfigurationError> for BuildError {
    fn from(error: ConfigurationError) -> Self {
        BuildError::Invalid(vec![error])
    }
}

impl BuildError {
    /// Every configuration error found, in definition order.
    pub fn configuration_errors(&self) -> &[ConfigurationError] {
        match self {
            BuildError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn join(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
