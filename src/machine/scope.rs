//! Handle passed to state hooks.

use crate::core::Id;
use crate::machine::queue::EventQueue;
use crate::machine::table::TransitionTable;
use std::any::Any;
use tracing::{trace, warn};

/// Lifecycle hook currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Update,
    Exit,
}

/// A hook's view of its owning machine.
///
/// Gives access to the machine's context and lets the state raise events.
/// Events are queued, never dispatched recursively: the machine processes
/// them after the hook returns, before `update()` hands control back.
///
/// When the machine is ticked by an outer machine's state, the outer
/// context is also reachable through [`parent_mut`](Self::parent_mut).
pub struct Scope<'m, C, S, E> {
    context: &'m mut C,
    queue: &'m mut EventQueue<E>,
    table: &'m TransitionTable<C, S, E>,
    parent: Option<&'m mut dyn Any>,
    state: S,
    phase: Phase,
}

impl<'m, C, S: Id, E: Id> Scope<'m, C, S, E> {
    pub(crate) fn new(
        context: &'m mut C,
        queue: &'m mut EventQueue<E>,
        table: &'m TransitionTable<C, S, E>,
        parent: Option<&'m mut dyn Any>,
        state: S,
        phase: Phase,
    ) -> Self {
        Self {
            context,
            queue,
            table,
            parent,
            state,
            phase,
        }
    }

    /// Context of the machine running this hook.
    pub fn context(&self) -> &C {
        &*self.context
    }

    /// Mutable access to the context of the machine running this hook.
    pub fn context_mut(&mut self) -> &mut C {
        &mut *self.context
    }

    /// Context of the machine driving this one, if it is a `P`.
    ///
    /// Only set while the machine runs through
    /// [`StateMachine::update_with`](crate::machine::StateMachine::update_with),
    /// which is how [`SubMachine`](crate::machine::SubMachine) ticks it.
    pub fn parent<P: Any>(&self) -> Option<&P> {
        self.parent.as_deref()?.downcast_ref()
    }

    /// Mutable access to the driving machine's context, if it is a `P`.
    pub fn parent_mut<P: Any>(&mut self) -> Option<&mut P> {
        self.parent.as_deref_mut()?.downcast_mut()
    }

    /// Key of the state whose hook is running.
    pub fn state(&self) -> S {
        self.state
    }

    /// Hook currently running.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Queue `event` for dispatch in the current tick.
    ///
    /// Returns `false` from an `exit` hook, where the machine is already
    /// committed to a transition, and when the queue is full.
    pub fn send_event(&mut self, event: E) -> bool {
        if self.phase == Phase::Exit {
            warn!(
                state = self.state.name(),
                event = event.name(),
                "event rejected: sent from exit hook"
            );
            return false;
        }
        if !self.queue.push(event) {
            warn!(
                state = self.state.name(),
                event = event.name(),
                "event rejected: queue full"
            );
            return false;
        }
        trace!(state = self.state.name(), event = event.name(), "event queued");
        true
    }

    /// Whether `event` would move the machine out of this state if it were
    /// dispatched now.
    pub fn has_transition(&self, event: E) -> bool {
        self.table
            .resolve(self.state, event, &*self.context)
            .is_some()
    }

    /// Whether a pending event will take the machine out of this state.
    ///
    /// The first pending event that resolves decides the outgoing transition,
    /// so this only looks for any such event. Nested machines use it to skip
    /// their tick once the outer state is leaving.
    pub fn exit_requested(&self) -> bool {
        self.queue.iter().any(|event| self.has_transition(event))
    }

    /// Number of events queued so far in this tick.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}
