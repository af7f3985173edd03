//! Path state machine
//!
//! Keeps two indexes in sync:
//! - per state, the insertion-ordered set of paths in that state
//! - per path, the single state it occupies
//!
//! A path is in at most one state at a time.

use indexmap::IndexSet;
use std::collections::HashMap;

use crate::error::RosterError;
use crate::states::StateSet;

/// Tracks which declared state each path of one record is in.
///
/// Not synchronized; a machine belongs to whichever operation currently owns
/// the record.
#[derive(Debug, Clone)]
pub struct StateMachine {
    schema: StateSet,
    states: Vec<IndexSet<String>>,
    paths: HashMap<String, usize>,
}

impl StateMachine {
    /// Create a machine with every state empty.
    pub fn new(schema: StateSet) -> Self {
        let states = vec![IndexSet::new(); schema.len()];
        Self {
            schema,
            states,
            paths: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &StateSet {
        &self.schema
    }

    /// Move `path` into `state`, removing it from whichever state held it.
    ///
    /// A path already in `state` keeps its position.
    pub fn transition(&mut self, state: &str, path: &str) -> Result<(), RosterError> {
        let index = self
            .schema
            .index_of(state)
            .ok_or_else(|| RosterError::UnknownState(state.to_string()))?;
        self.transition_index(index, path);
        Ok(())
    }

    pub(crate) fn transition_index(&mut self, next: usize, path: &str) {
        match self.paths.get(path).copied() {
            Some(prev) if prev == next => return,
            Some(prev) => {
                self.states[prev].shift_remove(path);
            }
            None => {}
        }

        self.states[next].insert(path.to_string());
        self.paths.insert(path.to_string(), next);
        tracing::trace!(path, state = self.schema.name(next), "path state changed");
    }

    /// Current state of `path`, if tracked.
    pub fn state_of(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(|&index| self.schema.name(index))
    }

    pub(crate) fn state_index_of(&self, path: &str) -> Option<usize> {
        self.paths.get(path).copied()
    }

    pub fn contains(&self, state: &str, path: &str) -> bool {
        self.schema
            .index_of(state)
            .is_some_and(|index| self.states[index].contains(path))
    }

    /// Paths in one state, in insertion order.
    pub fn paths_in(&self, state: &str) -> impl Iterator<Item = &str> + '_ {
        self.select(&[state])
            .into_iter()
            .flat_map(move |index| self.states[index].iter().map(String::as_str))
    }

    pub fn len_of(&self, state: &str) -> usize {
        self.schema
            .index_of(state)
            .map_or(0, |index| self.states[index].len())
    }

    /// Number of tracked paths across all states.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop every path from `state`.
    pub fn clear(&mut self, state: &str) -> Result<(), RosterError> {
        let index = self
            .schema
            .index_of(state)
            .ok_or_else(|| RosterError::UnknownState(state.to_string()))?;
        self.clear_index(index);
        Ok(())
    }

    pub(crate) fn clear_index(&mut self, index: usize) {
        for path in self.states[index].drain(..) {
            self.paths.remove(&path);
        }
    }

    /// Stop tracking `path`. Returns the state it was in.
    pub fn forget(&mut self, path: &str) -> Option<&str> {
        let index = self.paths.remove(path)?;
        self.states[index].shift_remove(path);
        Some(self.schema.name(index))
    }

    /// Resolve a state filter to state indices.
    ///
    /// An empty filter selects every state in the schema's default order.
    /// Unknown names contribute nothing; repeated names count once.
    fn select(&self, states: &[&str]) -> Vec<usize> {
        if states.is_empty() {
            return self.schema.default_order();
        }

        let mut selected = Vec::with_capacity(states.len());
        for name in states {
            match self.schema.index_of(name) {
                Some(index) if !selected.contains(&index) => selected.push(index),
                Some(_) => {}
                None => tracing::debug!(state = %name, "query names undeclared state"),
            }
        }
        selected
    }

    /// Paths in the union of `states`, in visiting order.
    pub fn iter<'a>(&'a self, states: &[&str]) -> impl Iterator<Item = &'a str> + 'a {
        self.select(states)
            .into_iter()
            .flat_map(move |index| self.states[index].iter().map(String::as_str))
    }

    /// Call `f` once per path in the union of `states` (all states if empty).
    pub fn for_each<F>(&self, states: &[&str], mut f: F)
    where
        F: FnMut(&str),
    {
        for path in self.iter(states) {
            f(path);
        }
    }

    /// True if any path is in the union of `states` (any state if empty).
    pub fn some(&self, states: &[&str]) -> bool {
        self.select(states)
            .into_iter()
            .any(|index| !self.states[index].is_empty())
    }

    /// Collect `f(path)` for every path in the union of `states`, in visiting order.
    pub fn map<T, F>(&self, states: &[&str], f: F) -> Vec<T>
    where
        F: FnMut(&str) -> T,
    {
        self.iter(states).map(f).collect()
    }
}
