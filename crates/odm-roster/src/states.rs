//! State declarations

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::RosterError;
use crate::machine::StateMachine;

/// Order in which states are visited when a query names no states.
///
/// Paths within a state are always visited in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterOrder {
    /// First-declared state first
    #[default]
    Declaration,
    /// Last-declared state first
    ReverseDeclaration,
}

/// Ordered, distinct state names shared by every machine built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    names: Arc<[String]>,
    order: IterOrder,
}

impl StateSet {
    /// Declare the states, in order.
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(RosterError::EmptyStateSet);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(RosterError::BlankState);
            }
            if !seen.insert(name.as_str()) {
                return Err(RosterError::DuplicateState(name.clone()));
            }
        }

        Ok(Self {
            names: names.into(),
            order: IterOrder::default(),
        })
    }

    /// Names known to be valid at compile time.
    pub(crate) fn from_static(names: &[&'static str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            order: IterOrder::default(),
        }
    }

    pub fn with_order(mut self, order: IterOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> IterOrder {
        self.order
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub(crate) fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// State indices in default visiting order.
    pub(crate) fn default_order(&self) -> Vec<usize> {
        match self.order {
            IterOrder::Declaration => (0..self.names.len()).collect(),
            IterOrder::ReverseDeclaration => (0..self.names.len()).rev().collect(),
        }
    }

    /// Build an empty machine over these states.
    pub fn instance(&self) -> StateMachine {
        StateMachine::new(self.clone())
    }
}
