//! Value model
//!
//! Every value the document layer stores or compares is one of a closed set
//! of variants. `Kind` groups those variants into the categories the
//! comparator dispatches on.
//!
//! Values bridge to extended JSON:
//! - `{"$oid": "<24 hex>"}` ⇄ `ObjectId`
//! - `{"$binary": {"base64": "...", "subType": "00"}}` ⇄ `Binary`
//! - `{"$date": <millis>}` ⇄ `Date`

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;

use crate::binary::{Binary, SUBTYPE_GENERIC};
use crate::equal::deep_equal;
use crate::error::TypeError;
use crate::object_id::ObjectId;

/// Insertion-ordered key/value mapping.
pub type Map = IndexMap<String, Value>;

/// Comparator dispatch category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Null, booleans, numbers, strings and dates
    Scalar,
    /// Ordered sequences
    Sequence,
    /// Plain key/value mappings
    Mapping,
    /// `ObjectId`
    Identifier,
    /// `Binary`
    Payload,
    /// Untyped byte containers
    RawBytes,
}

impl Kind {
    /// Payloads and raw bytes compare with each other byte-wise.
    pub fn is_byte_container(self) -> bool {
        matches!(self, Kind::Payload | Kind::RawBytes)
    }
}

/// A document value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// UTC instant, compared at millisecond precision
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Map),
    ObjectId(ObjectId),
    Binary(Binary),
    /// Raw byte container with no payload type attached
    Bytes(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Double(_)
            | Value::String(_)
            | Value::Date(_) => Kind::Scalar,
            Value::Array(_) => Kind::Sequence,
            Value::Object(_) => Kind::Mapping,
            Value::ObjectId(_) => Kind::Identifier,
            Value::Binary(_) => Kind::Payload,
            Value::Bytes(_) => Kind::RawBytes,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key on an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Convert from extended JSON.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TypeError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Double(f))
                } else {
                    Err(TypeError::UnsupportedNumber(n.to_string()))
                }
            }
            Json::String(s) => Ok(Value::String(s.clone())),
            Json::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Json::Object(map) => {
                if map.len() == 1 {
                    if let Some(special) = Self::from_extended(map)? {
                        return Ok(special);
                    }
                }
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), Value::from_json(value)?);
                }
                Ok(Value::Object(out))
            }
        }
    }

    /// Recognize a single-key extended JSON wrapper. Returns `None` for plain objects.
    fn from_extended(map: &serde_json::Map<String, serde_json::Value>) -> Result<Option<Self>, TypeError> {
        if let Some(oid) = map.get("$oid").and_then(|v| v.as_str()) {
            return ObjectId::parse_str(oid).map(|id| Some(Value::ObjectId(id)));
        }

        if let Some(binary) = map.get("$binary") {
            let encoded = binary
                .get("base64")
                .and_then(|v| v.as_str())
                .ok_or_else(|| TypeError::InvalidBinary("missing base64 field".to_string()))?;
            let bytes = BASE64
                .decode(encoded)
                .map_err(|e| TypeError::InvalidBinary(e.to_string()))?;
            let subtype = match binary.get("subType").and_then(|v| v.as_str()) {
                Some(hex_subtype) => u8::from_str_radix(hex_subtype, 16)
                    .map_err(|_| TypeError::InvalidBinary(format!("bad subType '{}'", hex_subtype)))?,
                None => SUBTYPE_GENERIC,
            };
            return Ok(Some(Value::Binary(Binary::with_subtype(subtype, bytes))));
        }

        if let Some(date) = map.get("$date") {
            let millis = date
                .as_i64()
                .ok_or_else(|| TypeError::InvalidDate(date.to_string()))?;
            let instant = Utc
                .timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| TypeError::InvalidDate(millis.to_string()))?;
            return Ok(Some(Value::Date(instant)));
        }

        Ok(None)
    }

    /// Convert to extended JSON.
    ///
    /// Non-finite doubles have no JSON form and become `null`. Raw bytes are
    /// written as a generic `$binary`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(instant) => json!({ "$date": instant.timestamp_millis() }),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::ObjectId(id) => json!({ "$oid": id.to_hex() }),
            Value::Binary(binary) => binary_json(binary.subtype, &binary.bytes),
            Value::Bytes(bytes) => binary_json(SUBTYPE_GENERIC, bytes),
        }
    }
}

fn binary_json(subtype: u8, bytes: &[u8]) -> serde_json::Value {
    json!({
        "$binary": {
            "base64": BASE64.encode(bytes),
            "subType": format!("{:02x}", subtype)
        }
    })
}

/// Equality is structural equality as decided by [`deep_equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::from_json(&json).map_err(serde::de::Error::custom)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::Date(instant)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::ObjectId(id)
    }
}

impl From<Binary> for Value {
    fn from(binary: Binary) -> Self {
        Value::Binary(binary)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}
