//! Guard predicates for controlling transitions.
//!
//! A guard is a boolean function over the machine's context attached to a
//! single edge. When a state-specific edge's guard rejects, resolution falls
//! through to the any-state edge for the same event.

/// Predicate that decides whether a guarded edge may fire.
///
/// Guards are evaluated while the event is being resolved, so they see the
/// context as left by every hook that ran earlier in the tick. They must not
/// depend on hidden mutable state.
///
/// # Example
///
/// ```rust
/// use hfsm::core::Guard;
///
/// struct Sensor {
///     distance: f32,
/// }
///
/// let in_range = Guard::new(|s: &Sensor| s.distance < 4.0);
///
/// assert!(in_range.check(&Sensor { distance: 1.5 }));
/// assert!(!in_range.check(&Sensor { distance: 9.0 }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> std::fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}
