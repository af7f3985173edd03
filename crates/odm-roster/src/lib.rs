//! Active roster: per-record path state tracking.
//!
//! A record declares a fixed, ordered set of mutually exclusive states once
//! (`StateSet`). Each record instance then owns a `StateMachine` that places
//! every tracked path in exactly one of those states and answers bulk queries
//! over them. `ActiveRoster` is the typed form used by the document layer,
//! with the `require`, `init` and `modify` lifecycle states.
//!
//! Undeclared state names are rejected by mutating operations
//! (`RosterError::UnknownState`) and read as empty sets by queries.

mod error;
mod machine;
mod roster;
mod states;

pub use error::RosterError;
pub use machine::StateMachine;
pub use roster::{ActiveRoster, Lifecycle};
pub use states::{IterOrder, StateSet};
