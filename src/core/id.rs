//! Identifier trait shared by state keys and event ids.
//!
//! Machines never inspect state or event types at runtime. Every state is
//! addressed by a small `Copy` key (usually a fieldless enum) and every event
//! by an id drawn from a finite, consumer-defined domain.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state keys and event ids.
///
/// # Required Traits
///
/// - `Copy`: ids are passed by value through the queue and the table
/// - `Eq` + `Hash`: ids key the transition table and the instance cache
/// - `Debug`: ids appear in diagnostics
///
/// # Example
///
/// ```rust
/// use hfsm::core::Id;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Patrol {
///     Walk,
///     Rest,
/// }
///
/// impl Id for Patrol {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Walk => "Walk",
///             Self::Rest => "Rest",
///         }
///     }
/// }
///
/// assert_eq!(Patrol::Rest.name(), "Rest");
/// ```
///
/// The [`id_enum!`](crate::id_enum) macro generates this impl.
pub trait Id: Copy + Eq + Hash + Debug + 'static {
    /// Name used in log fields and error messages.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Door {
        Open,
        Closed,
        Locked,
    }

    impl Id for Door {
        fn name(&self) -> &'static str {
            match self {
                Self::Open => "Open",
                Self::Closed => "Closed",
                Self::Locked => "Locked",
            }
        }
    }

    #[test]
    fn name_returns_correct_value() {
        assert_eq!(Door::Open.name(), "Open");
        assert_eq!(Door::Closed.name(), "Closed");
        assert_eq!(Door::Locked.name(), "Locked");
    }

    #[test]
    fn ids_hash_by_variant() {
        let set: HashSet<Door> = [Door::Open, Door::Closed, Door::Open].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains(&Door::Open));
        assert!(!set.contains(&Door::Locked));
    }

    #[test]
    fn ids_are_copy() {
        let door = Door::Locked;
        let copied = door;
        assert_eq!(door, copied);
    }
}
