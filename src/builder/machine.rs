//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Guard, Id, State};
use crate::machine::{BoxedState, ConfigurationError, MachineConfig, StateFactory, StateMachine};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

enum PendingEdge<C, S, E> {
    Specific {
        from: S,
        to: S,
        event: E,
        guard: Option<Guard<C>>,
    },
    Any {
        to: S,
        event: E,
        guard: Option<Guard<C>>,
    },
}

/// Builder for constructing state machines with a fluent API.
///
/// Unlike the direct [`StateMachine`] calls, which fail on the first bad
/// definition, `build` applies every step and reports all configuration
/// errors together.
pub struct MachineBuilder<C, S, E> {
    config: MachineConfig,
    states: Vec<(S, StateFactory<C, S, E>)>,
    edges: Vec<PendingEdge<C, S, E>>,
    start: Option<S>,
}

impl<C, S: Id, E: Id> MachineBuilder<C, S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            states: Vec::new(),
            edges: Vec::new(),
            start: None,
        }
    }

    /// Replace the default config.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a state factory.
    pub fn state<F, T>(mut self, key: S, factory: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: State<C, S, E> + 'static,
    {
        let boxed: StateFactory<C, S, E> =
            Box::new(move || -> BoxedState<C, S, E> { Box::new(factory()) });
        self.states.push((key, boxed));
        self
    }

    /// Register `T::default` as the factory for `key`.
    pub fn state_default<T>(self, key: S) -> Self
    where
        T: State<C, S, E> + Default + 'static,
    {
        self.state(key, T::default)
    }

    /// Add the transition `from --event--> to`.
    pub fn transition(mut self, from: S, to: S, event: E) -> Self {
        self.edges.push(PendingEdge::Specific {
            from,
            to,
            event,
            guard: None,
        });
        self
    }

    /// Add a transition using a closure as its guard.
    pub fn transition_when<F>(mut self, from: S, to: S, event: E, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + 'static,
    {
        self.edges.push(PendingEdge::Specific {
            from,
            to,
            event,
            guard: Some(Guard::new(predicate)),
        });
        self
    }

    /// Add the any-state fallback `* --event--> to`.
    pub fn any_transition(mut self, to: S, event: E) -> Self {
        self.edges.push(PendingEdge::Any {
            to,
            event,
            guard: None,
        });
        self
    }

    /// Add an any-state fallback using a closure as its guard.
    pub fn any_transition_when<F>(mut self, to: S, event: E, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + 'static,
    {
        self.edges.push(PendingEdge::Any {
            to,
            event,
            guard: Some(Guard::new(predicate)),
        });
        self
    }

    /// Set the start state (required).
    pub fn start(mut self, key: S) -> Self {
        self.start = Some(key);
        self
    }

    /// Build the machine around `context`.
    ///
    /// Returns [`BuildError::Invalid`] with every configuration error if any
    /// step fails.
    pub fn build(self, context: C) -> Result<StateMachine<C, S, E>, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;
        self.config.validate()?;

        let mut machine = StateMachine::with_config(context, self.config);
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigurationError>>> = Vec::new();

        for (key, factory) in self.states {
            checks.push(check(machine.register_boxed(key, factory)));
        }

        for edge in self.edges {
            let result = match edge {
                PendingEdge::Specific {
                    from,
                    to,
                    event,
                    guard: None,
                } => machine.add_transition(from, to, event),
                PendingEdge::Specific {
                    from,
                    to,
                    event,
                    guard: Some(guard),
                } => machine.add_transition_when(from, to, event, guard),
                PendingEdge::Any {
                    to,
                    event,
                    guard: None,
                } => machine.add_any_transition(to, event),
                PendingEdge::Any {
                    to,
                    event,
                    guard: Some(guard),
                } => machine.add_any_transition_when(to, event, guard),
            };
            checks.push(check(result));
        }

        checks.push(check(machine.set_start_state(start)));

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(machine),
            Validation::Failure(errors) => {
                Err(BuildError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}

impl<C, S: Id, E: Id> Default for MachineBuilder<C, S, E> {
    fn default() -> Self {
        Self::new()
    }
}

fn check(result: Result<(), ConfigurationError>) -> Validation<(), NonEmptyVec<ConfigurationError>> {
    match result {
        Ok(()) => Validation::success(()),
        Err(error) => Validation::fail(error),
    }
}
