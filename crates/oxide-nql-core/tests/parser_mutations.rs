//! Tests for `insert`, `update` and `delete` statements.

mod common;
use common::*;

use std::time::Duration;

use oxide_nql_core::ast::{param, Condition, Payload, QueryValue};
use oxide_nql_core::QueryError;

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_assignments() {
    let i = parse_insert("insert God (name = \"Diana\", age = 10)");
    assert_eq!(i.entity, "God");
    assert_eq!(
        i.payload,
        Payload::Conditions(vec![Condition::eq("name", "Diana"), Condition::eq("age", 10)])
    );
    assert_eq!(i.ttl, None);
    round_trip("insert God (name = \"Diana\", age = 10)");
}

#[test]
fn insert_into_is_optional() {
    assert_eq!(
        parse("insert into God (name = \"Diana\")"),
        parse("insert God (name = \"Diana\")")
    );
}

#[test]
fn insert_json() {
    let i = parse_insert("insert God {\"name\": \"Diana\", \"powers\": [\"hunt\"]}");
    assert_eq!(
        i.payload,
        Payload::Json(QueryValue::Json(
            serde_json::json!({"name": "Diana", "powers": ["hunt"]})
        ))
    );
    round_trip("insert God {\"name\": \"Diana\", \"powers\": [\"hunt\"]}");
}

#[test]
fn insert_json_parameter() {
    let i = parse_insert("insert God @document");
    assert_eq!(i.payload, Payload::Json(param("document")));
    round_trip("insert God @document");
}

#[test]
fn insert_with_ttl() {
    let cases = [
        ("1 day", Duration::from_secs(86_400)),
        ("2 hours", Duration::from_secs(7_200)),
        ("5 minute", Duration::from_secs(300)),
        ("10 seconds", Duration::from_secs(10)),
        ("250 millisecond", Duration::from_millis(250)),
        ("7 nanoseconds", Duration::from_nanos(7)),
    ];
    for (ttl, expected) in cases {
        let text = format!("insert God (name = \"Diana\") {ttl}");
        assert_eq!(parse_insert(&text).ttl, Some(expected), "{text}");
        round_trip(&text);
    }
}

#[test]
fn insert_rejects_both_payloads() {
    let err = parse_err("insert God (name = \"Diana\") {\"age\": 10}");
    assert!(matches!(err, QueryError::Semantic(_)), "{err:?}");
}

#[test]
fn insert_requires_payload() {
    assert!(matches!(parse_err("insert God"), QueryError::Syntax(_)));
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_assignments() {
    let u = parse_update("update God (name = \"Diana\", age = @age)");
    assert_eq!(u.entity, "God");
    assert_eq!(
        u.payload,
        Payload::Conditions(vec![
            Condition::eq("name", "Diana"),
            Condition::eq("age", param("age")),
        ])
    );
    round_trip("update God (name = \"Diana\", age = @age)");
}

#[test]
fn update_json() {
    let u = parse_update("update God {\"name\": \"Diana\"}");
    assert_eq!(
        u.payload,
        Payload::Json(QueryValue::Json(serde_json::json!({"name": "Diana"})))
    );
}

#[test]
fn update_does_not_take_ttl() {
    assert!(matches!(
        parse_err("update God (name = \"Diana\") 10 second"),
        QueryError::Syntax(_)
    ));
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_entities() {
    let d = parse_delete("delete from God where age > 10");
    assert!(d.fields.is_empty());
    assert_eq!(d.entity, "God");
    assert_eq!(d.condition, Some(Condition::gt("age", 10)));
    round_trip("delete from God where age > 10");
}

#[test]
fn delete_fields() {
    let d = parse_delete("delete name, age from God");
    assert_eq!(d.fields, vec!["name", "age"]);
    assert_eq!(d.condition, None);
    round_trip("delete name, age from God");
}

#[test]
fn delete_star_is_whole_entity() {
    assert_eq!(parse("delete * from God"), parse("delete from God"));
}

#[test]
fn delete_takes_no_ordering() {
    assert!(matches!(
        parse_err("delete from God order by name"),
        QueryError::Syntax(_)
    ));
}
