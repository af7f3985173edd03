//! Active roster behaviour and state-partition invariants.

use odm_roster::{ActiveRoster, IterOrder, Lifecycle, StateSet};
use proptest::prelude::*;
use std::collections::HashSet;

use odm_roster::Lifecycle::{Init, Modify, Require};

fn populated() -> ActiveRoster {
    let mut ar = ActiveRoster::new();
    ar.init("hello");
    ar.init("goodbye");
    ar.modify("world");
    ar.require("foo");
    ar
}

#[test]
fn test_state_change_removes_from_old_state() {
    let mut ar = ActiveRoster::new();
    ar.init("hello");
    ar.modify("hello");
    assert!(!ar.machine().contains("init", "hello"));
    assert!(ar.machine().contains("modify", "hello"));
}

#[test]
fn test_for_each_single_state() {
    let ar = populated();
    let mut seen = Vec::new();
    ar.for_each(&[Init], |path| seen.push(path.to_string()));
    assert_eq!(seen, vec!["hello", "goodbye"]);
}

#[test]
fn test_for_each_union_of_states() {
    let ar = populated();
    let mut seen = HashSet::new();
    ar.for_each(&[Modify, Require], |path| {
        assert!(seen.insert(path.to_string()), "visited {} twice", path);
    });
    let expected: HashSet<String> = ["world", "foo"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_for_each_all_states() {
    let ar = populated();
    let mut seen = Vec::new();
    ar.for_each(&[], |path| seen.push(path.to_string()));
    assert_eq!(seen, vec!["foo", "hello", "goodbye", "world"]);
}

#[test]
fn test_some() {
    let mut ar = ActiveRoster::new();
    assert!(!ar.some(&[]));
    ar.init("hello");
    ar.modify("world");
    assert!(ar.some(&[Init]));
    assert!(ar.some(&[Modify]));
    assert!(!ar.some(&[Require]));
    assert!(ar.some(&[Init, Modify]));
    assert!(ar.some(&[Init, Require]));
    assert!(ar.some(&[Modify, Require]));
    assert!(ar.some(&[]));
}

#[test]
fn test_map_named_states() {
    let mut ar = ActiveRoster::new();
    ar.init("hello");
    ar.modify("world");
    ar.require("iAmTheWalrus");
    let suffixed = ar.map(&[Init, Modify], |path| format!("{}-suffix", path));
    assert_eq!(suffixed, vec!["hello-suffix", "world-suffix"]);
}

#[test]
fn test_map_all_states() {
    let mut ar = ActiveRoster::new();
    ar.init("hello");
    ar.modify("world");
    ar.require("iAmTheWalrus");
    let suffixed = ar.map(&[], |path| format!("{}-suffix", path));
    assert_eq!(
        suffixed,
        vec!["iAmTheWalrus-suffix", "hello-suffix", "world-suffix"]
    );
}

#[test]
fn test_map_all_states_reverse_policy() {
    let mut ar = ActiveRoster::with_order(IterOrder::ReverseDeclaration);
    ar.init("hello");
    ar.modify("world");
    ar.require("iAmTheWalrus");
    assert_eq!(ar.paths(&[]), vec!["world", "hello", "iAmTheWalrus"]);
}

#[test]
fn test_dynamic_state_set() {
    let roster_type = StateSet::new(["require", "init", "modify"]).unwrap();
    let mut a = roster_type.instance();
    let b = roster_type.instance();
    a.transition("modify", "x").unwrap();
    assert_eq!(a.state_of("x"), Some("modify"));
    assert!(b.is_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Set(Lifecycle, String),
    Forget(String),
    Clear(Lifecycle),
}

fn lifecycle() -> impl Strategy<Value = Lifecycle> {
    prop_oneof![Just(Require), Just(Init), Just(Modify)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (lifecycle(), "[a-e]").prop_map(|(s, p)| Op::Set(s, p)),
        1 => "[a-e]".prop_map(Op::Forget),
        1 => lifecycle().prop_map(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_each_path_in_exactly_one_state(ops in prop::collection::vec(op(), 0..40)) {
        let mut ar = ActiveRoster::new();
        for op in &ops {
            match op {
                Op::Set(state, path) => {
                    ar.set_state(*state, path);
                    prop_assert_eq!(ar.state_of(path), Some(*state));
                }
                Op::Forget(path) => {
                    ar.forget(path);
                    prop_assert_eq!(ar.state_of(path), None);
                }
                Op::Clear(state) => {
                    ar.clear(*state);
                    prop_assert!(!ar.some(&[*state]));
                }
            }
        }

        let all = ar.paths(&[]);
        prop_assert_eq!(all.len(), ar.len());
        let distinct: HashSet<&String> = all.iter().collect();
        prop_assert_eq!(distinct.len(), all.len());

        let per_state: usize = Lifecycle::ALL.iter().map(|s| ar.len_of(*s)).sum();
        prop_assert_eq!(per_state, ar.len());

        for state in Lifecycle::ALL {
            for path in ar.paths(&[state]) {
                prop_assert_eq!(ar.state_of(&path), Some(state));
            }
            prop_assert_eq!(ar.some(&[state]), ar.len_of(state) > 0);
        }
        prop_assert_eq!(ar.some(&[]), !ar.is_empty());
    }

    #[test]
    fn prop_transition_adjusts_set_sizes(
        from in lifecycle(),
        to in lifecycle(),
    ) {
        let mut ar = ActiveRoster::new();
        ar.set_state(from, "p");
        let from_before = ar.len_of(from);
        let to_before = ar.len_of(to);
        ar.set_state(to, "p");
        if from == to {
            prop_assert_eq!(ar.len_of(to), to_before);
        } else {
            prop_assert_eq!(ar.len_of(from), from_before - 1);
            prop_assert_eq!(ar.len_of(to), to_before + 1);
        }
    }
}
