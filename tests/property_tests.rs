//! Property-based tests for event dispatch.
//!
//! These tests use proptest to check the machine against a small reference
//! model across many randomly generated event sequences.

use hfsm::core::{Route, State, TransitionHistory};
use hfsm::id_enum;
use hfsm::machine::{MachineConfig, StateMachine};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

id_enum! {
    #[derive(Serialize, Deserialize)]
    enum Node {
        A,
        B,
        C,
    }
}

id_enum! {
    #[derive(Serialize, Deserialize)]
    enum Ev {
        Next,
        Reset,
        Stray,
    }
}

#[derive(Default)]
struct Idle;

impl State<(), Node, Ev> for Idle {}

fn cycle(config: MachineConfig) -> StateMachine<(), Node, Ev> {
    let mut machine = StateMachine::with_config((), config);
    for node in [Node::A, Node::B, Node::C] {
        machine.register_default::<Idle>(node).unwrap();
    }
    machine.add_transition(Node::A, Node::B, Ev::Next).unwrap();
    machine.add_transition(Node::B, Node::C, Ev::Next).unwrap();
    machine.add_transition(Node::C, Node::A, Ev::Next).unwrap();
    machine.add_any_transition(Node::A, Ev::Reset).unwrap();
    machine.set_start_state(Node::A).unwrap();
    machine
}

/// Expected target for `event` from `from`, or `None` if it is dropped.
fn model(from: Node, event: Ev, allow_any_self: bool) -> Option<(Node, Route)> {
    match (from, event) {
        (Node::A, Ev::Next) => Some((Node::B, Route::Specific)),
        (Node::B, Ev::Next) => Some((Node::C, Route::Specific)),
        (Node::C, Ev::Next) => Some((Node::A, Route::Specific)),
        (Node::A, Ev::Reset) if !allow_any_self => None,
        (_, Ev::Reset) => Some((Node::A, Route::Any)),
        (_, Ev::Stray) => None,
    }
}

prop_compose! {
    fn arbitrary_event()(variant in 0..3u8) -> Ev {
        match variant {
            0 => Ev::Next,
            1 => Ev::Reset,
            _ => Ev::Stray,
        }
    }
}

fn assert_chained(history: &TransitionHistory<Node, Ev>) -> Result<(), TestCaseError> {
    let records: Vec<_> = history.transitions().collect();
    for pair in records.windows(2) {
        prop_assert_eq!(pair[0].to, pair[1].from);
        prop_assert!(pair[0].tick <= pair[1].tick);
    }
    Ok(())
}

proptest! {
    #[test]
    fn one_event_per_update_follows_model(
        events in prop::collection::vec(arbitrary_event(), 0..40),
        allow_any_self in any::<bool>(),
    ) {
        let config = MachineConfig::default().with_any_self_transition(allow_any_self);
        let mut machine = cycle(config);
        machine.update().unwrap();

        let mut expected = Node::A;
        let mut fired = 0;
        for event in events {
            prop_assert!(machine.send_event(event));
            machine.update().unwrap();

            if let Some((to, route)) = model(expected, event, allow_any_self) {
                expected = to;
                fired += 1;
                let last = machine.history().last().unwrap();
                prop_assert_eq!(last.event, event);
                prop_assert_eq!(last.route, route);
            }
            prop_assert_eq!(machine.current_state(), Some(expected));
            prop_assert_eq!(machine.pending_events(), 0);
        }

        prop_assert_eq!(machine.history().len(), fired);
        assert_chained(machine.history())?;
    }

    #[test]
    fn batched_events_match_one_at_a_time(
        events in prop::collection::vec(arbitrary_event(), 0..40),
    ) {
        let mut stepped = cycle(MachineConfig::default());
        let mut batched = cycle(MachineConfig::default());
        stepped.update().unwrap();
        batched.update().unwrap();

        for &event in &events {
            stepped.send_event(event);
            stepped.update().unwrap();
            prop_assert!(batched.send_event(event));
        }
        batched.update().unwrap();

        prop_assert_eq!(stepped.current_state(), batched.current_state());
        prop_assert_eq!(
            stepped.history().get_path(),
            batched.history().get_path()
        );
    }

    #[test]
    fn unmatched_events_never_move_the_machine(
        count in 1..20usize,
        ticks in 0..3usize,
    ) {
        let mut machine = cycle(MachineConfig::default());
        machine.update().unwrap();
        for _ in 0..ticks {
            machine.send_event(Ev::Next);
            machine.update().unwrap();
        }
        let before = machine.current_state();
        let recorded = machine.history().len();

        for _ in 0..count {
            machine.send_event(Ev::Stray);
        }
        machine.update().unwrap();

        prop_assert_eq!(machine.current_state(), before);
        prop_assert_eq!(machine.history().len(), recorded);
    }

    #[test]
    fn history_keeps_most_recent_records(
        steps in 0..30usize,
        capacity in 1..8usize,
    ) {
        let config = MachineConfig::default().with_history_capacity(capacity);
        let mut machine = cycle(config);
        machine.update().unwrap();
        for _ in 0..steps {
            machine.send_event(Ev::Next);
            machine.update().unwrap();
        }

        let history = machine.history();
        prop_assert_eq!(history.len(), steps.min(capacity));
        if steps > 0 {
            prop_assert_eq!(history.get_path().last().copied(), machine.current_state());
        }
        assert_chained(history)?;
    }

    #[test]
    fn history_roundtrip_serialization(
        events in prop::collection::vec(arbitrary_event(), 0..20),
    ) {
        let mut machine = cycle(MachineConfig::default());
        machine.update().unwrap();
        for event in events {
            machine.send_event(event);
            machine.update().unwrap();
        }

        let json = serde_json::to_string(machine.history()).unwrap();
        let restored: TransitionHistory<Node, Ev> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored.get_path(), machine.history().get_path());
        prop_assert_eq!(restored.len(), machine.history().len());
    }
}
