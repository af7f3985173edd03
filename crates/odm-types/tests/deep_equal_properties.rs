//! Comparator properties over generated values.

use chrono::{TimeZone, Utc};
use odm_types::{deep_equal, Binary, Map, ObjectId, Value};
use proptest::prelude::*;

fn date() -> impl Strategy<Value = Value> {
    (-2_000_000_000_000i64..4_000_000_000_000).prop_map(|ms| {
        Value::Date(Utc.timestamp_millis_opt(ms).unwrap())
    })
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Double),
        "[a-z]{0,8}".prop_map(Value::String),
        date(),
        any::<[u8; 12]>().prop_map(|b| Value::ObjectId(ObjectId::from_bytes(b))),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::Binary(Binary::new(b))),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c]{1,2}", inner), 0..4).prop_map(|pairs| {
                Value::Object(pairs.into_iter().collect::<Map>())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_reflexive(v in value()) {
        prop_assert!(deep_equal(&v, &v));
        prop_assert!(deep_equal(&v, &v.clone()));
    }

    #[test]
    fn prop_symmetric(a in value(), b in value()) {
        prop_assert_eq!(deep_equal(&a, &b), deep_equal(&b, &a));
    }

    #[test]
    fn prop_binary_matches_raw_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let payload = Value::Binary(Binary::new(bytes.clone()));
        let raw = Value::Bytes(bytes);
        prop_assert!(deep_equal(&payload, &raw));
        prop_assert!(deep_equal(&raw, &payload));
    }

    #[test]
    fn prop_binary_never_equals_array(bytes in prop::collection::vec(any::<u8>(), 0..8)) {
        let payload = Value::Binary(Binary::new(bytes.clone()));
        let ints = Value::Array(bytes.into_iter().map(|b| Value::Int(i64::from(b))).collect());
        prop_assert!(!deep_equal(&payload, &ints));
        prop_assert!(!deep_equal(&ints, &payload));
    }

    #[test]
    fn prop_dates_equal_iff_same_millis(
        a in -2_000_000_000_000i64..4_000_000_000_000,
        b in -2_000_000_000_000i64..4_000_000_000_000,
    ) {
        let x = Value::Date(Utc.timestamp_millis_opt(a).unwrap());
        let y = Value::Date(Utc.timestamp_millis_opt(b).unwrap());
        prop_assert_eq!(deep_equal(&x, &y), a == b);
    }

    #[test]
    fn prop_int_equals_double_only_when_exact(i in any::<i64>()) {
        let d = i as f64;
        let exact = d as i128 == i128::from(i);
        prop_assert_eq!(deep_equal(&Value::Int(i), &Value::Double(d)), exact);
        prop_assert_eq!(deep_equal(&Value::Double(d), &Value::Int(i)), exact);
    }

    #[test]
    fn prop_object_id_equal_iff_same_hex(a in any::<[u8; 12]>(), b in any::<[u8; 12]>()) {
        let x = Value::ObjectId(ObjectId::from_bytes(a));
        let y = Value::ObjectId(ObjectId::from_bytes(b));
        prop_assert_eq!(deep_equal(&x, &y), a == b);
    }
}

#[test]
fn test_identifiers_from_same_source_are_equal() {
    let source = ObjectId::new().to_string();
    let a = Value::from(source.parse::<ObjectId>().unwrap());
    let b = Value::from(source.parse::<ObjectId>().unwrap());
    assert!(deep_equal(&a, &b));
    assert_eq!(a, b);
}

#[test]
fn test_document_array_roundtrip_through_json() {
    let json = serde_json::json!({
        "a1": [{ "a": "Hi" }, { "a": "Bye" }],
        "_id": { "$oid": "4f8b2c7a1d3e5f6071829304" }
    });
    let original = Value::from_json(&json).unwrap();
    let reloaded = Value::from_json(&original.to_json()).unwrap();
    assert!(deep_equal(&original, &reloaded));
    assert!(deep_equal(
        original.get("a1").unwrap(),
        reloaded.get("a1").unwrap()
    ));
}
