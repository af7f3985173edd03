//! ODM core - change tracking for an object-document mapper
//!
//! This crate ties together the pieces a persistence layer needs to compute
//! minimal writes:
//! - per-path lifecycle tracking (`odm_roster`)
//! - content equality over document values (`odm_types`)
//! - options merging and configuration (`config`)
//! - an in-memory document that drives all three (`document`)

pub mod config;
pub mod document;

pub use config::{merge_json_options, merge_options, ConfigError, OdmConfig, Options, WriteDefaults};
pub use document::{Delta, Document, DocumentError, FieldSpec, Schema};
pub use odm_roster::{ActiveRoster, IterOrder, Lifecycle, RosterError, StateMachine, StateSet};
pub use odm_types::{deep_equal, Binary, ByteView, Kind, Map, ObjectId, TypeError, Value};
