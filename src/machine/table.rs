//! Transition table with two-tier lookup.
//!
//! Resolution for current state `S` and event `E`:
//! 1. the specific edge `(S, E)`, if present and its guard passes;
//! 2. otherwise the any-state edge for `E`, if present and its guard passes;
//! 3. otherwise nothing, and the event is dropped by the caller.
//!
//! An any-state edge pointing back at the current state is skipped when the
//! table was built with `allow_any_self` cleared.

use crate::core::{Guard, Id, Route};
use crate::machine::error::ConfigurationError;
use std::collections::HashMap;

/// Outgoing edge: the target state and an optional guard.
#[derive(Debug)]
pub(crate) struct Edge<C, S> {
    pub(crate) to: S,
    pub(crate) guard: Option<Guard<C>>,
}

impl<C, S: Copy> Edge<C, S> {
    fn admits(&self, context: &C) -> Option<S> {
        match &self.guard {
            Some(guard) if !guard.check(context) => None,
            _ => Some(self.to),
        }
    }
}

#[derive(Debug)]
pub(crate) struct TransitionTable<C, S, E> {
    specific: HashMap<(S, E), Edge<C, S>>,
    any: HashMap<E, Edge<C, S>>,
    allow_any_self: bool,
}

impl<C, S: Id, E: Id> TransitionTable<C, S, E> {
    pub(crate) fn new(allow_any_self: bool) -> Self {
        Self {
            specific: HashMap::new(),
            any: HashMap::new(),
            allow_any_self,
        }
    }

    pub(crate) fn insert(
        &mut self,
        from: S,
        event: E,
        edge: Edge<C, S>,
    ) -> Result<(), ConfigurationError> {
        if self.specific.contains_key(&(from, event)) {
            return Err(ConfigurationError::DuplicateTransition {
                from: from.name().to_string(),
                event: event.name().to_string(),
            });
        }
        self.specific.insert((from, event), edge);
        Ok(())
    }

    pub(crate) fn insert_any(&mut self, event: E, edge: Edge<C, S>) -> Result<(), ConfigurationError> {
        if self.any.contains_key(&event) {
            return Err(ConfigurationError::DuplicateAnyTransition {
                event: event.name().to_string(),
            });
        }
        self.any.insert(event, edge);
        Ok(())
    }

    /// Resolve `event` for the state `from`. Returns the target and the tier
    /// that matched.
    pub(crate) fn resolve(&self, from: S, event: E, context: &C) -> Option<(S, Route)> {
        if let Some(to) = self
            .specific
            .get(&(from, event))
            .and_then(|edge| edge.admits(context))
        {
            return Some((to, Route::Specific));
        }

        self.any
            .get(&event)
            .and_then(|edge| edge.admits(context))
            .filter(|to| self.allow_any_self || *to != from)
            .map(|to| (to, Route::Any))
    }

    pub(crate) fn len(&self) -> usize {
        self.specific.len() + self.any.len()
    }
}
