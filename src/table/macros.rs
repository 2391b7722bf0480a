//! Macros for declaring table state ids.

/// Declare a fieldless enum and implement
/// [`StateId`](crate::table::StateId) for it, naming each variant after
/// its identifier.
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
/// use statecraft::table::StateId;
///
/// state_enum! {
///     pub enum Phase {
///         Idle,
///         Running,
///     }
/// }
///
/// assert_eq!(Phase::Running.name(), "Running");
/// ```
#[macro_export]
macro_rules! state_enum {
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

        impl $crate::table::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::table::StateId;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
    }

    #[test]
    fn state_enum_supports_visibility_and_docs() {
        state_enum! {
            /// Public ids.
            pub enum PublicState {
                /// First variant.
                A,
                B,
            }
        }

        assert_eq!(PublicState::B.name(), "B");
        assert_ne!(PublicState::A, PublicState::B);
    }
}
