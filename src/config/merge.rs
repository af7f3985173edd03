//! Options merge logic
//!
//! Shallow overlay of a sparse options object onto defaults:
//! - Keys in both: override wins
//! - Keys only in defaults: copied into the result AND written back into
//!   the overrides object, so callers end up holding fully populated options
//! - Nested values are not merged

use indexmap::IndexMap;
use odm_types::Value;

/// Insertion-ordered options object.
pub type Options<V = Value> = IndexMap<String, V>;

/// Merge `overrides` over `defaults` into a new options object.
///
/// `defaults` is never modified. When `overrides` is given it is enriched in
/// place with every default it was missing, appended in `defaults` order, and
/// the result has the same keys in the same order. Without overrides the
/// result is a fresh copy of `defaults`.
pub fn merge_options<V: Clone>(defaults: &Options<V>, overrides: Option<&mut Options<V>>) -> Options<V> {
    overlay(defaults, overrides)
}

/// [`merge_options`] for JSON objects.
pub fn merge_json_options(
    defaults: &serde_json::Map<String, serde_json::Value>,
    overrides: Option<&mut serde_json::Map<String, serde_json::Value>>,
) -> serde_json::Map<String, serde_json::Value> {
    overlay(defaults, overrides)
}

/// String-keyed object the merge can read and enrich.
trait OptionsObject: Clone {
    type Item: Clone;

    fn has_key(&self, key: &str) -> bool;
    fn put(&mut self, key: String, value: Self::Item);
    fn for_each_entry(&self, f: impl FnMut(&String, &Self::Item));
}

impl<V: Clone> OptionsObject for Options<V> {
    type Item = V;

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn for_each_entry(&self, mut f: impl FnMut(&String, &Self::Item)) {
        for (key, value) in self {
            f(key, value);
        }
    }
}

impl OptionsObject for serde_json::Map<String, serde_json::Value> {
    type Item = serde_json::Value;

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: serde_json::Value) {
        self.insert(key, value);
    }

    fn for_each_entry(&self, mut f: impl FnMut(&String, &Self::Item)) {
        for (key, value) in self {
            f(key, value);
        }
    }
}

fn overlay<M: OptionsObject>(defaults: &M, overrides: Option<&mut M>) -> M {
    match overrides {
        Some(overrides) => {
            defaults.for_each_entry(|key, value| {
                if !overrides.has_key(key) {
                    overrides.put(key.clone(), value.clone());
                }
            });
            overrides.clone()
        }
        None => defaults.clone(),
    }
}
