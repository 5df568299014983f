//! hfsm: a tick-driven hierarchical state machine engine
//!
//! A machine is generic over a context type shared with every state, a
//! state-key type and an event-id type. States implement `enter`, `update`
//! and `exit` hooks and raise events through the [`Scope`](machine::Scope)
//! they are handed; the machine resolves each event against its transition
//! table and runs the hooks in a fixed order.
//!
//! # Core Concepts
//!
//! - **State**: lifecycle hooks via the `State` trait, one cached instance
//!   per key
//! - **Transitions**: `(from, event) -> to` edges, with any-state edges as a
//!   lower-priority fallback
//! - **Events**: queued FIFO and fully drained before `update()` returns
//! - **Nesting**: an outer state drives an inner machine with `SubMachine`
//!
//! # Example
//!
//! ```rust
//! use hfsm::builder::MachineBuilder;
//! use hfsm::core::State;
//! use hfsm::machine::Scope;
//! use hfsm::id_enum;
//!
//! id_enum! {
//!     enum Phase {
//!         Follow,
//!         Flee,
//!     }
//! }
//!
//! id_enum! {
//!     enum Sight {
//!         TooClose,
//!         Safe,
//!     }
//! }
//!
//! struct Enemy {
//!     distance: f32,
//! }
//!
//! #[derive(Default)]
//! struct Follow;
//!
//! impl State<Enemy, Phase, Sight> for Follow {
//!     fn update(&mut self, scope: &mut Scope<'_, Enemy, Phase, Sight>) {
//!         scope.context_mut().distance -= 1.0;
//!         if scope.context().distance < 4.0 {
//!             scope.send_event(Sight::TooClose);
//!         }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Flee;
//!
//! impl State<Enemy, Phase, Sight> for Flee {}
//!
//! let mut machine = MachineBuilder::new()
//!     .state_default::<Follow>(Phase::Follow)
//!     .state_default::<Flee>(Phase::Flee)
//!     .transition(Phase::Follow, Phase::Flee, Sight::TooClose)
//!     .transition(Phase::Flee, Phase::Follow, Sight::Safe)
//!     .start(Phase::Follow)
//!     .build(Enemy { distance: 5.5 })
//!     .unwrap();
//!
//! machine.update().unwrap();
//! assert!(machine.is_current_state(Phase::Follow));
//! machine.update().unwrap();
//! assert!(machine.is_current_state(Phase::Flee));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{Guard, Id, State, TransitionHistory};
pub use crate::machine::{MachineConfig, Scope, StateMachine, SubMachine};
