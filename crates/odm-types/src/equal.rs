//! Structural deep equality
//!
//! Rules apply in priority order:
//! 0. Operands whose `Kind`s cannot match are unequal (payloads and raw
//!    byte containers are mutually comparable)
//! 1. Scalars of the same kind compare by value (`Int` and `Double` compare
//!    by exact numeric value; dates by millisecond instant)
//! 2. Sequences: same length and pairwise equal
//! 3. Identifiers: canonical hex forms match
//! 4. Payloads and raw byte containers: same length and same bytes, in
//!    either operand order
//! 5. Mappings: same key set (order ignored) and equal values per key
//! 6. Anything else is unequal

use crate::binary::{bytes_equal, ByteView};
use crate::value::{Kind, Map, Value};

/// Decide whether two values carry the same content.
///
/// Total and symmetric. `NaN` equals `NaN` so every value equals itself.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if !kinds_comparable(a.kind(), b.kind()) {
        return false;
    }

    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Double(x), Value::Double(y)) => doubles_equal(*x, *y),
        (Value::Int(x), Value::Double(y)) | (Value::Double(y), Value::Int(x)) => {
            int_equals_double(*x, *y)
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x.timestamp_millis() == y.timestamp_millis(),

        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }

        (Value::ObjectId(x), Value::ObjectId(y)) => x.to_hex() == y.to_hex(),

        (Value::Binary(_) | Value::Bytes(_), Value::Binary(_) | Value::Bytes(_)) => {
            match (byte_view(a), byte_view(b)) {
                (Some(x), Some(y)) => bytes_equal(x, y),
                _ => false,
            }
        }

        (Value::Object(x), Value::Object(y)) => maps_equal(x, y),

        _ => false,
    }
}

fn doubles_equal(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

fn kinds_comparable(a: Kind, b: Kind) -> bool {
    a == b || (a.is_byte_container() && b.is_byte_container())
}

/// Exact comparison: `d` must be integral and inside `i64` range.
fn int_equals_double(i: i64, d: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    d.fract() == 0.0 && d >= i64::MIN as f64 && d < i64::MAX as f64 && d as i64 == i
}

fn byte_view(value: &Value) -> Option<&dyn ByteView> {
    match value {
        Value::Binary(binary) => Some(binary as &dyn ByteView),
        Value::Bytes(bytes) => Some(bytes as &dyn ByteView),
        _ => None,
    }
}

fn maps_equal(a: &Map, b: &Map) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, x)| match b.get(key) {
        Some(y) => deep_equal(x, y),
        None => false,
    })
}
