//! Macros for ergonomic id declaration.

/// Declare a fieldless enum usable as a state key or event id.
///
/// Derives the traits [`Id`](crate::core::Id) requires and implements
/// `name()` from the variant names. Extra attributes, such as serde derives
/// for transition history, pass through.
///
/// # Example
///
/// ```
/// use hfsm::core::Id;
/// use hfsm::id_enum;
///
/// id_enum! {
///     pub enum EnemyState {
///         FollowPlayer,
///         FleeFromPlayer,
///         ExtractIntel,
///     }
/// }
///
/// assert_eq!(EnemyState::ExtractIntel.name(), "ExtractIntel");
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Id for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
