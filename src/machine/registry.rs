//! State factories and the per-machine instance cache.

use crate::core::{Id, State};
use crate::machine::error::ConfigurationError;
use std::collections::HashMap;
use tracing::trace;

/// Boxed state instance owned by a machine.
pub type BoxedState<C, S, E> = Box<dyn State<C, S, E>>;

/// Builds the instance for one state key.
pub type StateFactory<C, S, E> = Box<dyn Fn() -> BoxedState<C, S, E>>;

/// Maps each state key to its factory and to its cached instance.
///
/// An instance is built the first time its key is needed and lives until the
/// registry is dropped.
pub(crate) struct StateRegistry<C, S, E> {
    factories: HashMap<S, StateFactory<C, S, E>>,
    instances: HashMap<S, BoxedState<C, S, E>>,
}

impl<C, S: Id, E> StateRegistry<C, S, E> {
    pub(crate) fn new() -> Self {
        Self {
            factories: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    pub(crate) fn register(
        &mut self,
        key: S,
        factory: StateFactory<C, S, E>,
    ) -> Result<(), ConfigurationError> {
        if self.factories.contains_key(&key) {
            return Err(ConfigurationError::DuplicateState {
                state: key.name().to_string(),
            });
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    pub(crate) fn ensure_registered(&self, key: S) -> Result<(), ConfigurationError> {
        if self.factories.contains_key(&key) {
            Ok(())
        } else {
            Err(ConfigurationError::UnregisteredState {
                state: key.name().to_string(),
            })
        }
    }

    /// Cached instance for `key`, built from its factory on first use.
    pub(crate) fn instance_mut(&mut self, key: S) -> Option<&mut BoxedState<C, S, E>> {
        if !self.instances.contains_key(&key) {
            let factory = self.factories.get(&key)?;
            trace!(state = key.name(), "constructing state instance");
            self.instances.insert(key, factory());
        }
        self.instances.get_mut(&key)
    }

    pub(crate) fn is_materialized(&self, key: S) -> bool {
        self.instances.contains_key(&key)
    }

    pub(crate) fn materialized_count(&self) -> usize {
        self.instances.len()
    }
}
