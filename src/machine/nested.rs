//! Nested machines driven from inside an outer state.
//!
//! An outer state owns a [`SubMachine`], activates it on `enter`, forwards
//! its own tick from `update` and releases it on `exit`. The forward is
//! skipped once the outer state has an exit pending, so outer transitions
//! preempt the inner machine for that tick.
//!
//! During a forwarded tick every inner hook can reach the outer context
//! through [`Scope::parent_mut`].

use crate::builder::BuildError;
use crate::core::Id;
use crate::machine::engine::StateMachine;
use crate::machine::error::MachineError;
use crate::machine::scope::Scope;
use std::any::Any;
use tracing::{debug, trace};

/// Builds a fresh inner machine for each activation.
pub type MachineFactory<C, S, E> = Box<dyn Fn() -> Result<StateMachine<C, S, E>, BuildError>>;

/// Inner machine scoped to the activations of an outer state.
///
/// Inner states see two contexts: the inner machine's own `C`, built fresh
/// by the factory on each activation, and the outer context, lent to them
/// through [`Scope::parent_mut`] while [`tick`](Self::tick) runs. The outer
/// state can also reach the inner machine through
/// [`machine_mut`](Self::machine_mut).
///
/// # Example
///
/// ```rust
/// use hfsm::builder::MachineBuilder;
/// use hfsm::core::State;
/// use hfsm::machine::{Scope, StateMachine, SubMachine};
/// use hfsm::id_enum;
///
/// id_enum! { enum Outer { Work, Rest } }
/// id_enum! { enum OuterEvent { Tired } }
/// id_enum! { enum Inner { Dig, Haul } }
/// id_enum! { enum InnerEvent { Full } }
///
/// #[derive(Default)]
/// struct Camp {
///     hauled: u32,
/// }
///
/// #[derive(Default)]
/// struct Dig;
/// impl State<u32, Inner, InnerEvent> for Dig {
///     fn update(&mut self, scope: &mut Scope<'_, u32, Inner, InnerEvent>) {
///         *scope.context_mut() += 1;
///         if let Some(camp) = scope.parent_mut::<Camp>() {
///             camp.hauled += 1;
///         }
///     }
/// }
///
/// #[derive(Default)]
/// struct Haul;
/// impl State<u32, Inner, InnerEvent> for Haul {}
///
/// struct Work {
///     crew: SubMachine<u32, Inner, InnerEvent>,
/// }
///
/// impl Default for Work {
///     fn default() -> Self {
///         Self {
///             crew: SubMachine::new(|| {
///                 MachineBuilder::new()
///                     .state_default::<Dig>(Inner::Dig)
///                     .state_default::<Haul>(Inner::Haul)
///                     .transition(Inner::Dig, Inner::Haul, InnerEvent::Full)
///                     .start(Inner::Dig)
///                     .build(0)
///             }),
///         }
///     }
/// }
///
/// impl State<Camp, Outer, OuterEvent> for Work {
///     fn enter(&mut self, _scope: &mut Scope<'_, Camp, Outer, OuterEvent>) {
///         self.crew.activate().unwrap();
///     }
///
///     fn update(&mut self, scope: &mut Scope<'_, Camp, Outer, OuterEvent>) {
///         self.crew.tick(scope).unwrap();
///     }
///
///     fn exit(&mut self, _scope: &mut Scope<'_, Camp, Outer, OuterEvent>) {
///         self.crew.release();
///     }
/// }
///
/// #[derive(Default)]
/// struct Rest;
/// impl State<Camp, Outer, OuterEvent> for Rest {}
///
/// let mut machine = StateMachine::new(Camp::default());
/// machine.register_default::<Work>(Outer::Work).unwrap();
/// machine.register_default::<Rest>(Outer::Rest).unwrap();
/// machine.add_transition(Outer::Work, Outer::Rest, OuterEvent::Tired).unwrap();
/// machine.set_start_state(Outer::Work).unwrap();
///
/// machine.update().unwrap();
/// machine.update().unwrap();
/// assert!(machine.is_current_state(Outer::Work));
/// assert_eq!(machine.context().hauled, 2);
/// ```
pub struct SubMachine<C, S, E> {
    factory: MachineFactory<C, S, E>,
    machine: Option<StateMachine<C, S, E>>,
}

impl<C, S: Id, E: Id> SubMachine<C, S, E> {
    /// Wrap `factory`; nothing is built until [`activate`](Self::activate).
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<StateMachine<C, S, E>, BuildError> + 'static,
    {
        Self {
            factory: Box::new(factory),
            machine: None,
        }
    }

    /// Build a fresh inner machine, replacing any previous one.
    ///
    /// Calling this again on re-entry always yields a machine that has not
    /// started, so the inner start state is entered on the next tick.
    pub fn activate(&mut self) -> Result<(), BuildError> {
        let machine = (self.factory)()?;
        debug!(
            start = machine.start_state().map(|s| s.name()),
            "inner machine activated"
        );
        self.machine = Some(machine);
        Ok(())
    }

    /// Forward one tick to the inner machine, lending it the outer context.
    ///
    /// Returns `Ok(false)` without ticking when inactive or when `outer`
    /// already has an exit pending.
    pub fn tick<OC: Any, OS: Id, OE: Id>(
        &mut self,
        outer: &mut Scope<'_, OC, OS, OE>,
    ) -> Result<bool, MachineError> {
        let Some(machine) = self.machine.as_mut() else {
            return Ok(false);
        };
        if outer.exit_requested() {
            trace!(
                outer = outer.state().name(),
                "outer exit pending; inner tick skipped"
            );
            return Ok(false);
        }
        machine.update_with(outer.context_mut())?;
        Ok(true)
    }

    /// Drop the inner machine and return it.
    pub fn release(&mut self) -> Option<StateMachine<C, S, E>> {
        self.machine.take()
    }

    /// Whether an inner machine is currently held.
    pub fn is_active(&self) -> bool {
        self.machine.is_some()
    }

    /// Inner machine of the current activation.
    pub fn machine(&self) -> Option<&StateMachine<C, S, E>> {
        self.machine.as_ref()
    }

    /// Mutable access to the inner machine of the current activation.
    pub fn machine_mut(&mut self) -> Option<&mut StateMachine<C, S, E>> {
        self.machine.as_mut()
    }
}
