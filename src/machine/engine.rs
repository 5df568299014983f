//! The tick-driven state machine.

use crate::core::{Guard, Id, State, TransitionHistory, TransitionRecord};
use crate::machine::config::MachineConfig;
use crate::machine::error::{ConfigurationError, MachineError};
use crate::machine::queue::EventQueue;
use crate::machine::registry::{BoxedState, StateFactory, StateRegistry};
use crate::machine::scope::{Phase, Scope};
use crate::machine::table::{Edge, TransitionTable};
use chrono::Utc;
use std::any::Any;
use std::fmt;
use tracing::{debug, trace, warn};

/// Event-driven state machine over context `C`, state keys `S` and events `E`.
///
/// Build the machine first (register states, add transitions, set the start
/// state), then drive it by calling [`update`](Self::update) at whatever
/// cadence the caller chooses. Definition calls fail once the first update
/// has run.
///
/// # Example
///
/// ```rust
/// use hfsm::core::State;
/// use hfsm::machine::{Scope, StateMachine};
/// use hfsm::id_enum;
///
/// id_enum! {
///     enum Sentry {
///         Patrol,
///         Alarm,
///     }
/// }
///
/// id_enum! {
///     enum Noise {
///         Heard,
///         Calm,
///     }
/// }
///
/// struct Post {
///     noise_level: u8,
/// }
///
/// #[derive(Default)]
/// struct Patrol;
///
/// impl State<Post, Sentry, Noise> for Patrol {
///     fn update(&mut self, scope: &mut Scope<'_, Post, Sentry, Noise>) {
///         if scope.context().noise_level > 3 {
///             scope.send_event(Noise::Heard);
///         }
///     }
/// }
///
/// #[derive(Default)]
/// struct Alarm;
///
/// impl State<Post, Sentry, Noise> for Alarm {}
///
/// let mut machine = StateMachine::new(Post { noise_level: 0 });
/// machine.register_default::<Patrol>(Sentry::Patrol).unwrap();
/// machine.register_default::<Alarm>(Sentry::Alarm).unwrap();
/// machine.add_transition(Sentry::Patrol, Sentry::Alarm, Noise::Heard).unwrap();
/// machine.add_any_transition(Sentry::Patrol, Noise::Calm).unwrap();
/// machine.set_start_state(Sentry::Patrol).unwrap();
///
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), Some(Sentry::Patrol));
///
/// machine.context_mut().noise_level = 9;
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), Some(Sentry::Alarm));
/// ```
pub struct StateMachine<C, S, E> {
    context: C,
    config: MachineConfig,
    registry: StateRegistry<C, S, E>,
    table: TransitionTable<C, S, E>,
    queue: EventQueue<E>,
    history: TransitionHistory<S, E>,
    start: Option<S>,
    current: Option<S>,
    running: bool,
    tick: u64,
    last_accepted: Option<E>,
}

impl<C, S: Id, E: Id> StateMachine<C, S, E> {
    /// Create a machine bound to `context` with the default config.
    pub fn new(context: C) -> Self {
        Self::with_config(context, MachineConfig::default())
    }

    /// Create a machine bound to `context` with an explicit config.
    pub fn with_config(context: C, config: MachineConfig) -> Self {
        Self {
            context,
            registry: StateRegistry::new(),
            table: TransitionTable::new(config.allow_any_self_transition),
            queue: EventQueue::new(config.max_queued_events),
            history: TransitionHistory::with_capacity(config.history_capacity),
            config,
            start: None,
            current: None,
            running: false,
            tick: 0,
            last_accepted: None,
        }
    }

    fn ensure_not_started(&self) -> Result<(), ConfigurationError> {
        if self.running {
            Err(ConfigurationError::AlreadyStarted)
        } else {
            Ok(())
        }
    }

    /// Register the factory that builds the instance for `key`.
    pub fn register<F, T>(&mut self, key: S, factory: F) -> Result<(), ConfigurationError>
    where
        F: Fn() -> T + 'static,
        T: State<C, S, E> + 'static,
    {
        let boxed: StateFactory<C, S, E> =
            Box::new(move || -> BoxedState<C, S, E> { Box::new(factory()) });
        self.register_boxed(key, boxed)
    }

    /// Register an already type-erased factory for `key`.
    pub fn register_boxed(
        &mut self,
        key: S,
        factory: StateFactory<C, S, E>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_not_started()?;
        self.registry.register(key, factory)
    }

    /// Register `T::default` as the factory for `key`.
    pub fn register_default<T>(&mut self, key: S) -> Result<(), ConfigurationError>
    where
        T: State<C, S, E> + Default + 'static,
    {
        self.register(key, T::default)
    }

    /// Add the edge `from --event--> to`.
    pub fn add_transition(&mut self, from: S, to: S, event: E) -> Result<(), ConfigurationError> {
        self.insert_edge(from, to, event, None)
    }

    /// Add the edge `from --event--> to`, firing only while `guard` passes.
    ///
    /// A rejected guard counts as no specific match, so an any-state edge for
    /// the same event may fire instead.
    pub fn add_transition_when(
        &mut self,
        from: S,
        to: S,
        event: E,
        guard: Guard<C>,
    ) -> Result<(), ConfigurationError> {
        self.insert_edge(from, to, event, Some(guard))
    }

    fn insert_edge(
        &mut self,
        from: S,
        to: S,
        event: E,
        guard: Option<Guard<C>>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_not_started()?;
        self.registry.ensure_registered(from)?;
        self.registry.ensure_registered(to)?;
        self.table.insert(from, event, Edge { to, guard })
    }

    /// Add the fallback edge `* --event--> to`, consulted only when the
    /// current state has no matching edge of its own.
    pub fn add_any_transition(&mut self, to: S, event: E) -> Result<(), ConfigurationError> {
        self.insert_any_edge(to, event, None)
    }

    /// Guarded variant of [`add_any_transition`](Self::add_any_transition).
    pub fn add_any_transition_when(
        &mut self,
        to: S,
        event: E,
        guard: Guard<C>,
    ) -> Result<(), ConfigurationError> {
        self.insert_any_edge(to, event, Some(guard))
    }

    fn insert_any_edge(
        &mut self,
        to: S,
        event: E,
        guard: Option<Guard<C>>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_not_started()?;
        self.registry.ensure_registered(to)?;
        self.table.insert_any(event, Edge { to, guard })
    }

    /// Designate the start state and build its instance.
    ///
    /// Its `enter` hook runs on the first [`update`](Self::update).
    pub fn set_start_state(&mut self, key: S) -> Result<(), ConfigurationError> {
        self.ensure_not_started()?;
        if let Some(current) = self.start {
            return Err(ConfigurationError::StartStateAlreadySet {
                current: current.name().to_string(),
                requested: key.name().to_string(),
            });
        }
        self.registry.ensure_registered(key)?;
        self.registry.instance_mut(key);
        self.start = Some(key);
        Ok(())
    }

    /// Queue `event` for the next update.
    ///
    /// Returns `false` if the machine has not started or the queue is full.
    pub fn send_event(&mut self, event: E) -> bool {
        if !self.running {
            warn!(event = event.name(), "event rejected: machine not running");
            return false;
        }
        if !self.queue.push(event) {
            warn!(event = event.name(), "event rejected: queue full");
            return false;
        }
        trace!(event = event.name(), "event queued");
        true
    }

    /// Run one tick.
    ///
    /// The first tick enters the start state and dispatches whatever its
    /// `enter` queued. Every tick then runs the current state's `update` and
    /// dispatches pending events until the queue is empty, so the machine is
    /// never mid-transition when this returns.
    pub fn update(&mut self) -> Result<(), MachineError> {
        self.advance(None)
    }

    /// Run one tick with `parent` lent to every hook that runs in it.
    ///
    /// Hooks reach it through [`Scope::parent_mut`]. [`SubMachine`] ticks
    /// inner machines this way so inner states can act on the outer context.
    ///
    /// [`SubMachine`]: crate::machine::SubMachine
    pub fn update_with<P: Any>(&mut self, parent: &mut P) -> Result<(), MachineError> {
        let parent: &mut dyn Any = parent;
        self.advance(Some(parent))
    }

    fn advance(&mut self, mut parent: Option<&mut dyn Any>) -> Result<(), MachineError> {
        self.tick += 1;
        let mut transitions = 0;

        if !self.running {
            let start = self.start.ok_or(MachineError::NoStartState)?;
            self.running = true;
            self.current = Some(start);
            debug!(state = start.name(), "machine started");
            self.run_hook(start, Phase::Enter, parent.as_deref_mut());
            self.drain(&mut transitions, parent.as_deref_mut())?;
        }

        if let Some(current) = self.current {
            self.run_hook(current, Phase::Update, parent.as_deref_mut());
        }
        self.drain(&mut transitions, parent)
    }

    fn drain(
        &mut self,
        transitions: &mut usize,
        mut parent: Option<&mut dyn Any>,
    ) -> Result<(), MachineError> {
        while let Some(event) = self.queue.pop() {
            let Some(from) = self.current else {
                break;
            };
            let Some((to, route)) = self.table.resolve(from, event, &self.context) else {
                trace!(
                    state = from.name(),
                    event = event.name(),
                    "event dropped: no transition"
                );
                continue;
            };

            if *transitions >= self.config.max_transitions_per_update {
                self.queue.clear();
                warn!(
                    state = from.name(),
                    limit = self.config.max_transitions_per_update,
                    "transition limit reached; pending events cleared"
                );
                return Err(MachineError::TransitionLimitExceeded {
                    limit: self.config.max_transitions_per_update,
                    state: from.name().to_string(),
                });
            }
            *transitions += 1;

            self.last_accepted = Some(event);
            self.run_hook(from, Phase::Exit, parent.as_deref_mut());
            self.current = Some(to);
            debug!(
                from = from.name(),
                to = to.name(),
                event = event.name(),
                ?route,
                "transition"
            );
            self.run_hook(to, Phase::Enter, parent.as_deref_mut());

            self.history.record(TransitionRecord {
                from,
                to,
                event,
                route,
                tick: self.tick,
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Keys reach `current` only after `ensure_registered`, so the instance
    /// lookup always finds a factory.
    fn run_hook(&mut self, key: S, phase: Phase, parent: Option<&mut dyn Any>) {
        let Self {
            registry,
            context,
            queue,
            table,
            ..
        } = self;
        let Some(state) = registry.instance_mut(key) else {
            return;
        };
        let mut scope = Scope::new(context, queue, table, parent, key, phase);
        match phase {
            Phase::Enter => state.enter(&mut scope),
            Phase::Update => state.update(&mut scope),
            Phase::Exit => state.exit(&mut scope),
        }
    }

    /// Key of the current state, `None` before the first update.
    pub fn current_state(&self) -> Option<S> {
        self.current
    }

    /// Whether `key` is the current state.
    pub fn is_current_state(&self, key: S) -> bool {
        self.current == Some(key)
    }

    /// Key passed to [`set_start_state`](Self::set_start_state), if any.
    pub fn start_state(&self) -> Option<S> {
        self.start
    }

    /// Whether the first update has run.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of `update()` calls made so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Last event that caused a transition.
    pub fn last_accepted_event(&self) -> Option<E> {
        self.last_accepted
    }

    /// Number of queued events. Always zero once `update()` returns.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Number of registered edges, specific and any-state.
    pub fn transition_count(&self) -> usize {
        self.table.len()
    }

    /// Whether the instance for `key` has been built.
    pub fn is_materialized(&self, key: S) -> bool {
        self.registry.is_materialized(key)
    }

    /// Number of state instances built so far.
    pub fn materialized_count(&self) -> usize {
        self.registry.materialized_count()
    }

    /// Recent transitions, bounded by `history_capacity`.
    pub fn history(&self) -> &TransitionHistory<S, E> {
        &self.history
    }

    /// Config the machine was created with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Context bound at construction.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context between updates.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consume the machine, dropping every state instance, and hand the
    /// context back.
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C, S: Id, E: Id> fmt::Debug for StateMachine<C, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("start", &self.start)
            .field("running", &self.running)
            .field("tick", &self.tick)
            .field("pending_events", &self.queue.len())
            .finish()
    }
}
