//! Roster error types.

/// Errors for state declaration and transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("state set must declare at least one state")]
    EmptyStateSet,

    #[error("state '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("state names must not be blank")]
    BlankState,

    #[error("unknown state '{0}'")]
    UnknownState(String),
}
