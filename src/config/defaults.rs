//! Built-in write defaults
//!
//! Lowest-precedence layer of every per-call write options object.

use serde::{Deserialize, Serialize};

use super::merge::Options;

/// Built-in write option values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteDefaults {
    /// Wait for the store to acknowledge the write (default: true)
    pub safe: bool,

    /// Insert when no stored record matches (default: false)
    pub upsert: bool,

    /// Apply an update to every matching record (default: false)
    pub multi: bool,
}

impl Default for WriteDefaults {
    fn default() -> Self {
        Self {
            safe: true,
            upsert: false,
            multi: false,
        }
    }
}

impl WriteDefaults {
    /// Convert to an options object for merging
    pub fn to_options(&self) -> Options {
        let mut options = Options::new();
        options.insert("safe".to_string(), self.safe.into());
        options.insert("upsert".to_string(), self.upsert.into());
        options.insert("multi".to_string(), self.multi.into());
        options
    }
}
