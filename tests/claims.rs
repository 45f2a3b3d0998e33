//! Behaviour of claim sets through the public API.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rusty_claims::types::reserved::{AUDIENCE, EXPIRATION};
use rusty_claims::{Claims, ClaimsError};
use serde_json::{json, Value};

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1_000_000i32..1_000_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn claims_strategy() -> impl Strategy<Value = Claims> {
    prop::collection::btree_map("[a-z]{1,6}", json_value(), 0..8).prop_map(|entries| {
        let mut claims = Claims::new();
        for (key, value) in entries {
            claims.set(key, value);
        }
        claims
    })
}

proptest! {
    #[test]
    fn test_contains_matches_get(claims in claims_strategy(), key in "[a-z]{1,6}") {
        prop_assert_eq!(claims.contains(&key), claims.get(&key).is_some());
    }

    #[test]
    fn test_uninitialized_ignores_writes(key in "[a-z]{1,6}", value in json_value()) {
        let mut claims = Claims::uninitialized();
        prop_assert_eq!(claims.set(key.clone(), value), None);
        prop_assert_eq!(claims.delete(&key), None);
        prop_assert!(!claims.contains(&key));
        prop_assert_eq!(claims.get(&key), None);
        prop_assert!(!claims.is_initialized());
    }

    #[test]
    fn test_json_round_trip(claims in claims_strategy()) {
        let bytes = claims.to_json().unwrap();
        let decoded = Claims::from_json(&bytes).unwrap();
        prop_assert_eq!(decoded.len(), claims.len());
        for (key, value) in claims.iter() {
            prop_assert!(decoded.contains(key));
            prop_assert_eq!(decoded.get(key), Some(value));
        }
    }

    #[test]
    fn test_expiration_truncates_to_seconds(secs in 0i64..4_000_000_000, nanos in 0u32..1_000_000_000) {
        let t = Utc.timestamp_opt(secs, nanos).unwrap();
        let mut claims = Claims::new();
        claims.set_expiration(t);
        prop_assert_eq!(claims.expiration(), Utc.timestamp_opt(secs, 0).single());
    }
}

#[test]
fn test_empty_and_uninitialized_encode_as_object() {
    assert_eq!(serde_json::to_string(&Claims::new()).unwrap(), "{}");
    assert_eq!(serde_json::to_string(&Claims::uninitialized()).unwrap(), "{}");
    assert_eq!(serde_json::to_string(&Claims::default()).unwrap(), "{}");
}

#[test]
fn test_decode_registered_claims() {
    let claims = Claims::from_json(br#"{"sub":"u1","exp":1700000000}"#).unwrap();
    assert_eq!(claims.subject().as_deref(), Some("u1"));
    assert_eq!(claims.expiration(), Utc.timestamp_opt(1_700_000_000, 0).single());
    assert_eq!(claims.issuer(), None);
}

#[test]
fn test_decode_merges_into_existing_claims() {
    let mut claims = Claims::new();
    claims.set("foo", "bar");
    claims.set("sub", "old");
    claims.merge_json(br#"{"sub":"new","extra":[1,2]}"#).unwrap();
    assert_eq!(claims.len(), 3);
    assert_eq!(claims.get_string("foo").as_deref(), Some("bar"));
    assert_eq!(claims.subject().as_deref(), Some("new"));
    assert_eq!(claims.get("extra"), Some(&json!([1, 2])));
}

#[test]
fn test_deserialize_null_leaves_claims_uninitialized() {
    let claims: Claims = serde_json::from_str("null").unwrap();
    assert!(!claims.is_initialized());
    let claims: Claims = serde_json::from_str("{}").unwrap();
    assert!(claims.is_initialized());
    assert!(claims.is_empty());
}

#[test]
fn test_audience_wire_shapes() {
    let mut claims = Claims::new();
    claims.set_audience(["a"]);
    assert_eq!(claims.get(AUDIENCE), Some(&json!("a")));
    claims.set_audience(["a", "b"]);
    assert_eq!(claims.get(AUDIENCE), Some(&json!(["a", "b"])));
    claims.set_audience(Vec::<&str>::new());
    assert!(!claims.contains(AUDIENCE));

    let claims = Claims::from_json(br#"{"aud":["a",7]}"#).unwrap();
    assert_eq!(claims.audience(), None);
    let claims = Claims::from_json(br#"{"aud":"solo"}"#).unwrap();
    assert_eq!(claims.audience(), Some(vec!["solo".to_string()]));
}

#[test]
fn test_coercion_failures_are_not_found() {
    let claims = Claims::from_json(
        br#"{"flag":true,"text":"abc","num":"42","pi":"3.5","when":"2023-11-14T22:13:20Z","exp":"yesterday"}"#,
    )
    .unwrap();
    assert_eq!(claims.get_int("flag"), None);
    assert_eq!(claims.get_float("flag"), None);
    assert_eq!(claims.get_int("text"), None);
    assert_eq!(claims.get_int("num"), Some(42));
    assert_eq!(claims.get_float("pi"), Some(3.5));
    assert_eq!(claims.get_int("pi"), None);
    assert_eq!(
        claims.get_time("when"),
        Utc.timestamp_opt(1_700_000_000, 0).single()
    );
    assert!(claims.contains(EXPIRATION));
    assert_eq!(claims.expiration(), None);
}

#[test]
fn test_lenient_timestamps_are_not_found() {
    let claims = Claims::from_json(
        br#"{"space":"2023-11-14 22:13:20Z","lower":"2023-11-14t22:13:20z","strict":"2023-11-14T22:13:20Z"}"#,
    )
    .unwrap();
    assert_eq!(claims.get_time("space"), None);
    assert_eq!(claims.get_time("lower"), None);
    assert_eq!(
        claims.get_time("strict"),
        Utc.timestamp_opt(1_700_000_000, 0).single()
    );
}

#[test]
fn test_unmarshalling_errors() {
    let mut claims = Claims::new();
    claims.set("keep", 1);
    let err = claims.merge_json(b"{\"broken\":").unwrap_err();
    assert!(matches!(err, ClaimsError::JsonUnmarshalling(_)));
    assert!(err.to_string().starts_with("cannot unmarshal claims from JSON"));
    assert_eq!(claims.len(), 1);
}

#[test]
fn test_custom_claims_survive_round_trip() {
    let input = br#"{"iss":"me","nested":{"roles":["a","b"],"level":3},"ok":false,"none":null}"#;
    let claims = Claims::from_json(input).unwrap();
    let again = Claims::from_json(&claims.to_json().unwrap()).unwrap();
    assert_eq!(again, claims);
    assert_eq!(again.get("none"), Some(&Value::Null));
    assert_eq!(again.get("nested"), Some(&json!({"roles": ["a", "b"], "level": 3})));
}
