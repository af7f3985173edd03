//! Configuration and options merging
//!
//! Per-call write options are built in layers:
//! 1. Built-in write defaults
//! 2. `[write_defaults]` from the config file
//! 3. Options supplied at the call site

mod defaults;
mod merge;
mod settings;

pub use defaults::WriteDefaults;
pub use merge::{merge_json_options, merge_options, Options};
pub use settings::{ConfigError, OdmConfig};
