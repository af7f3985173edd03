//! Document lifecycle roster
//!
//! Lifecycle states, in declaration order:
//! - `require`: declared required, no value yet
//! - `init`: value loaded from storage or filled from a default
//! - `modify`: value explicitly assigned since load

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::machine::StateMachine;
use crate::states::{IterOrder, StateSet};

/// Lifecycle state of a document path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Require,
    Init,
    Modify,
}

impl Lifecycle {
    /// All states in declaration order
    pub const ALL: [Lifecycle; 3] = [Lifecycle::Require, Lifecycle::Init, Lifecycle::Modify];

    const NAMES: [&'static str; 3] = ["require", "init", "modify"];

    pub fn as_str(&self) -> &'static str {
        Self::NAMES[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            Lifecycle::Require => 0,
            Lifecycle::Init => 1,
            Lifecycle::Modify => 2,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed state machine over the lifecycle states.
#[derive(Debug, Clone)]
pub struct ActiveRoster {
    machine: StateMachine,
}

impl ActiveRoster {
    pub fn new() -> Self {
        Self::with_order(IterOrder::default())
    }

    pub fn with_order(order: IterOrder) -> Self {
        let schema = StateSet::from_static(&Lifecycle::NAMES).with_order(order);
        Self {
            machine: schema.instance(),
        }
    }

    pub fn require(&mut self, path: &str) {
        self.set_state(Lifecycle::Require, path);
    }

    pub fn init(&mut self, path: &str) {
        self.set_state(Lifecycle::Init, path);
    }

    pub fn modify(&mut self, path: &str) {
        self.set_state(Lifecycle::Modify, path);
    }

    pub fn set_state(&mut self, state: Lifecycle, path: &str) {
        self.machine.transition_index(state.index(), path);
    }

    pub fn state_of(&self, path: &str) -> Option<Lifecycle> {
        self.machine
            .state_index_of(path)
            .and_then(Lifecycle::from_index)
    }

    pub fn is(&self, state: Lifecycle, path: &str) -> bool {
        self.state_of(path) == Some(state)
    }

    pub fn for_each<F>(&self, states: &[Lifecycle], f: F)
    where
        F: FnMut(&str),
    {
        self.machine.for_each(&names(states), f);
    }

    pub fn some(&self, states: &[Lifecycle]) -> bool {
        self.machine.some(&names(states))
    }

    pub fn map<T, F>(&self, states: &[Lifecycle], f: F) -> Vec<T>
    where
        F: FnMut(&str) -> T,
    {
        self.machine.map(&names(states), f)
    }

    /// Owned list of paths in the union of `states`.
    pub fn paths(&self, states: &[Lifecycle]) -> Vec<String> {
        self.map(states, str::to_string)
    }

    pub fn len_of(&self, state: Lifecycle) -> usize {
        self.machine.len_of(state.as_str())
    }

    pub fn len(&self) -> usize {
        self.machine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machine.is_empty()
    }

    pub fn clear(&mut self, state: Lifecycle) {
        self.machine.clear_index(state.index());
    }

    pub fn forget(&mut self, path: &str) -> Option<Lifecycle> {
        let previous = self.state_of(path);
        self.machine.forget(path);
        previous
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }
}

impl Default for ActiveRoster {
    fn default() -> Self {
        Self::new()
    }
}

fn names(states: &[Lifecycle]) -> Vec<&'static str> {
    states.iter().map(Lifecycle::as_str).collect()
}
