//! In-memory document with change tracking
//!
//! Drives the active roster the way a persistence layer does:
//! - construction: defaulted fields → `init`, required fields without a
//!   default → `require`
//! - load from storage: every loaded field → `init`
//! - assignment: `modify`, unless the new value deep-equals the current one
//! - after a successful write: every `modify` field → `init`
//!
//! Field paths are keys of the top-level mapping.

mod schema;

pub use schema::{FieldSpec, Schema};

use odm_roster::{ActiveRoster, Lifecycle};
use odm_types::{deep_equal, Map, Value};
use std::sync::Arc;

use crate::config::{merge_options, OdmConfig, Options};

/// Document errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Minimal write for a document: changed fields plus the write options.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    /// Modified fields with their current values, in roster order
    pub set: Map,

    /// Write options merged over the configured defaults
    pub options: Options,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// A tracked record.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    fields: Map,
    roster: ActiveRoster,
    write_defaults: Options,
}

impl Document {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_config(schema, &OdmConfig::default())
    }

    pub fn with_config(schema: Arc<Schema>, config: &OdmConfig) -> Self {
        let mut roster = ActiveRoster::with_order(config.iteration_order);
        let mut fields = Map::new();

        for spec in schema.fields() {
            match &spec.default {
                Some(default) => {
                    fields.insert(spec.name.clone(), default.clone());
                    roster.init(&spec.name);
                }
                None if spec.required => roster.require(&spec.name),
                None => {}
            }
        }

        Self {
            schema,
            fields,
            roster,
            write_defaults: config.write_defaults.clone(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load stored field values. Every loaded field becomes `init`.
    pub fn hydrate(&mut self, stored: Map) {
        tracing::debug!(fields = stored.len(), "hydrating document");
        for (path, value) in stored {
            self.roster.init(&path);
            self.fields.insert(path, value);
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    /// Assign a field. Returns true if the value changed and the field is now
    /// `modify`; an equal value leaves the field's state alone.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        if let Some(current) = self.fields.get(path) {
            if deep_equal(current, &value) {
                tracing::debug!(path, "assignment leaves value unchanged");
                return false;
            }
        }

        self.fields.insert(path.to_string(), value);
        self.roster.modify(path);
        true
    }

    /// Flag a field as modified without assigning, e.g. after mutating a
    /// nested value in place.
    pub fn mark_modified(&mut self, path: &str) {
        self.roster.modify(path);
    }

    pub fn is_modified(&self, path: &str) -> bool {
        self.roster.is(Lifecycle::Modify, path)
    }

    pub fn is_init(&self, path: &str) -> bool {
        self.roster.is(Lifecycle::Init, path)
    }

    /// True if any field was loaded, defaulted or assigned.
    pub fn is_populated(&self) -> bool {
        self.roster.some(&[Lifecycle::Init, Lifecycle::Modify])
    }

    pub fn modified_paths(&self) -> Vec<String> {
        self.roster.paths(&[Lifecycle::Modify])
    }

    /// Required fields that still have no value.
    pub fn missing_required(&self) -> Vec<String> {
        self.roster.paths(&[Lifecycle::Require])
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::MissingRequired(missing))
        }
    }

    /// Plain object of the current field values.
    pub fn to_object(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Compute the write needed to persist pending changes.
    ///
    /// `overrides` is merged over the configured write defaults and enriched
    /// in place with every default it was missing.
    pub fn delta(&self, overrides: Option<&mut Options>) -> Delta {
        let set = self.roster.map(&[Lifecycle::Modify], |path| {
            let value = self.fields.get(path).cloned().unwrap_or(Value::Null);
            (path.to_string(), value)
        });

        Delta {
            set: set.into_iter().collect(),
            options: merge_options(&self.write_defaults, overrides),
        }
    }

    /// Record that pending changes were written: every `modify` field
    /// becomes `init`.
    pub fn commit(&mut self) {
        let modified = self.modified_paths();
        tracing::debug!(fields = modified.len(), "committing document");
        for path in &modified {
            self.roster.init(path);
        }
    }

    pub fn roster(&self) -> &ActiveRoster {
        &self.roster
    }
}
