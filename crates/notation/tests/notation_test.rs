//! Integration tests for dot-notation reads and writes.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Map, Value, json};
use sift_notation::Notation;

fn sample() -> Value {
    json!({
        "user": {
            "name": "Alice",
            "email": null,
            "tags": [],
            "address": {"city": "Oslo"}
        },
        "count": 0
    })
}

#[rstest]
#[case("user.name", json!("Alice"))]
#[case("user.address.city", json!("Oslo"))]
#[case("user.email", json!(null))]
#[case("count", json!(0))]
#[case("user.missing", json!("default"))]
#[case("user.name.first", json!("default"))]
#[case("nope.deeper", json!("default"))]
fn get_resolves_or_defaults(#[case] path: &str, #[case] expected: Value) {
    let notation = Notation::default();
    assert_eq!(notation.get(&sample(), path, json!("default")), expected);
}

#[rstest]
#[case("user.email", true)]
#[case("user.tags", true)]
#[case("count", true)]
#[case("user.phone", false)]
#[case("address.city", false)]
fn isset_distinguishes_present_falsy_from_absent(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(Notation::default().isset(&sample(), path), expected);
}

#[test]
fn nested_set_leaves_a_container_at_the_parent() {
    let notation = Notation::default();
    let mut data = json!({});
    notation.set(&mut data, "a.b.c", json!("leaf")).unwrap();

    assert_eq!(notation.get(&data, "a.b.c", Value::Null), json!("leaf"));
    assert!(notation.get(&data, "a.b", Value::Null).is_object());
}

#[test]
fn flatten_then_expand_restores_nested_objects() {
    let notation = Notation::default();
    let nested = json!({"db": {"host": "localhost", "port": 5432}, "debug": false});
    let flat = notation.flatten(&nested, "");
    assert_eq!(notation.expand(&flat).unwrap(), nested);
}

proptest! {
    #[test]
    fn flat_key_round_trip(key in "[a-z_]{1,12}", n in any::<i64>()) {
        let notation = Notation::default();
        let mut data = json!({"other": true});
        notation.set(&mut data, &key, json!(n)).unwrap();
        prop_assert_eq!(notation.get(&data, &key, Value::Null), json!(n));
    }

    #[test]
    fn flatten_inverts_expand(
        entries in prop::collection::btree_map("[a-d]{1,2}(\\.[a-d]{1,2}){0,2}", any::<i32>(), 0..8)
    ) {
        // keys must not collide across nesting levels ("a" vs "a.b")
        let keys: Vec<&String> = entries.keys().collect();
        let collides = keys.iter().any(|a| {
            keys.iter().any(|b| a != b && b.starts_with(&format!("{a}.")))
        });
        prop_assume!(!collides);

        let notation = Notation::default();
        let flat: Map<String, Value> = entries
            .into_iter()
            .map(|(k, v)| (k, json!(v)))
            .collect();

        let expanded = notation.expand(&flat).unwrap();
        prop_assert_eq!(notation.flatten(&expanded, ""), flat);
    }
}
