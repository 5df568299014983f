//! State transition history tracking.
//!
//! Machines record every completed transition into a bounded history so a
//! caller can inspect the path taken without instrumenting its own hooks.

use super::id::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Which table tier matched the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// A `(from, event)` edge registered for the outgoing state.
    Specific,
    /// The any-state fallback edge for the event.
    Any,
}

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, E> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// Which tier of the table matched
    pub route: Route,
    /// The machine tick during which the transition ran
    pub tick: u64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of transitions.
///
/// Once `capacity` records are held, recording drops the oldest one. A
/// capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use hfsm::core::{Route, TransitionHistory, TransitionRecord};
/// use hfsm::id_enum;
///
/// id_enum! {
///     enum Step {
///         A,
///         B,
///         C,
///     }
/// }
///
/// id_enum! {
///     enum Go {
///         Next,
///     }
/// }
///
/// let mut history = TransitionHistory::with_capacity(8);
/// for (from, to) in [(Step::A, Step::B), (Step::B, Step::C)] {
///     history.record(TransitionRecord {
///         from,
///         to,
///         event: Go::Next,
///         route: Route::Specific,
///         tick: 1,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec![Step::A, Step::B, Step::C]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<S, E> {
    capacity: usize,
    transitions: VecDeque<TransitionRecord<S, E>>,
}

impl<S: Id, E: Id> TransitionHistory<S, E> {
    /// Create an empty history holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&mut self, transition: TransitionRecord<S, E>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by the
    /// `to` state of each record.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Duration from the oldest to the newest retained record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate records from oldest to newest.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<S, E>> {
        self.transitions.iter()
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S, E>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
