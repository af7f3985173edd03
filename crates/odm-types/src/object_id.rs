//! Record identifier type
//!
//! 12-byte identifier: 4-byte big-endian seconds timestamp, 5-byte
//! per-process random value, 3-byte big-endian counter.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::error::TypeError;

/// Counter wraps at 24 bits.
const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Per-process random component, fixed for the life of the process
static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();

/// Monotonic counter, randomly seeded on first use
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

fn process_unique() -> [u8; 5] {
    *PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>)
}

fn next_counter() -> u32 {
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
        .fetch_add(1, Ordering::SeqCst)
        & COUNTER_MASK
}

/// Unique record identifier, compared by its canonical hex form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let counter = next_counter();

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&process_unique());
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse the canonical 24-character hex form (case-insensitive).
    pub fn parse_str(s: &str) -> Result<Self, TypeError> {
        if s.len() != 24 {
            return Err(TypeError::InvalidObjectId(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| TypeError::InvalidObjectId(s.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Canonical string form (lower-case hex).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creation time embedded in the identifier.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let secs = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(i64::from(secs), 0)
            .single()
            .unwrap_or_default()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
        assert_ne!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn test_hex_is_canonical() {
        let id = ObjectId::parse_str("4F8B2C7A1D3E5F6071829304").unwrap();
        assert_eq!(id.to_hex(), "4f8b2c7a1d3e5f6071829304");
        assert_eq!(id.to_string(), id.to_hex());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            ObjectId::parse_str("abc"),
            Err(TypeError::InvalidObjectId(_))
        ));
        assert!(ObjectId::parse_str("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_timestamp_embedded() {
        let before = Utc::now().timestamp();
        let id = ObjectId::new();
        let ts = id.timestamp().timestamp();
        assert!(ts >= before - 1 && ts <= Utc::now().timestamp() + 1);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = ObjectId::from_bytes([1; 12]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"010101010101010101010101\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
