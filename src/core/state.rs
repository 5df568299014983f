//! Lifecycle trait implemented by every state.
//!
//! A state is a unit of behavior with three hooks. Each hook receives a
//! [`Scope`] that stands in for the back-reference to the owning machine:
//! through it the state reaches the shared context and raises events.

use crate::machine::Scope;

/// Behavior run while a machine is in a given state.
///
/// All hooks default to no-ops, so a state implements only what it needs.
/// The machine caches one instance per state key and reuses it across
/// activations. Anything that must start fresh on each activation has to be
/// reset in [`enter`](State::enter).
///
/// # Example
///
/// ```rust
/// use hfsm::core::State;
/// use hfsm::machine::{Scope, StateMachine};
/// use hfsm::id_enum;
///
/// id_enum! {
///     enum Light {
///         Off,
///         On,
///     }
/// }
///
/// id_enum! {
///     enum Switch {
///         Flip,
///     }
/// }
///
/// #[derive(Default)]
/// struct Room {
///     lit_ticks: u32,
/// }
///
/// #[derive(Default)]
/// struct Off;
///
/// impl State<Room, Light, Switch> for Off {}
///
/// #[derive(Default)]
/// struct On;
///
/// impl State<Room, Light, Switch> for On {
///     fn update(&mut self, scope: &mut Scope<'_, Room, Light, Switch>) {
///         scope.context_mut().lit_ticks += 1;
///     }
/// }
///
/// let mut machine = StateMachine::new(Room::default());
/// machine.register_default::<Off>(Light::Off).unwrap();
/// machine.register_default::<On>(Light::On).unwrap();
/// machine.add_transition(Light::Off, Light::On, Switch::Flip).unwrap();
/// machine.add_transition(Light::On, Light::Off, Switch::Flip).unwrap();
/// machine.set_start_state(Light::Off).unwrap();
///
/// machine.update().unwrap();
/// machine.send_event(Switch::Flip);
/// machine.update().unwrap();
/// machine.update().unwrap();
///
/// assert!(machine.is_current_state(Light::On));
/// assert_eq!(machine.context().lit_ticks, 1);
/// ```
pub trait State<C, S, E> {
    /// Called once when the machine transitions into this state, before any
    /// `update`.
    fn enter(&mut self, _scope: &mut Scope<'_, C, S, E>) {}

    /// Called once per tick while this state is current.
    fn update(&mut self, _scope: &mut Scope<'_, C, S, E>) {}

    /// Called once when the machine transitions out of this state.
    ///
    /// Events sent from here are rejected: the transition is already
    /// committed.
    fn exit(&mut self, _scope: &mut Scope<'_, C, S, E>) {}
}
