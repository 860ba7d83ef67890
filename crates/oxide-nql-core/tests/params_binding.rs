//! Tests for parameter slots, statement binding and prepared statements.

mod common;
use common::*;

use oxide_nql_core::ast::{Condition, QueryValue};
use oxide_nql_core::execution::PreparedState;
use oxide_nql_core::{prepare, Params, QueryError, Statement, Value, ValueKind};

#[test]
fn handle_reads_bound_value() {
    let mut params = Params::new();
    let handle = params.add("id");
    assert!(matches!(
        params.get(&handle),
        Err(QueryError::UnresolvedParameter(name)) if name == "id"
    ));
    params.bind("id", 10).unwrap();
    assert_eq!(params.get(&handle).unwrap(), &Value::Int(10));
}

#[test]
fn binding_unknown_name_fails() {
    let mut params = Params::new();
    params.add("id");
    assert!(matches!(
        params.bind("other", 1),
        Err(QueryError::UnknownParameter(name)) if name == "other"
    ));
}

#[test]
fn strict_bind_then_rebind() {
    let mut params = Params::new();
    params.add("id");
    params.bind("id", 1).unwrap();
    assert!(matches!(
        params.bind("id", 2),
        Err(QueryError::ParameterAlreadyBound(_))
    ));
    params.rebind("id", 2).unwrap();
    assert_eq!(params.value("id").unwrap(), &Value::Int(2));
}

#[test]
fn parameter_type_checks() {
    let mut params = Params::new();
    params.add("name");
    assert!(!params.is_instance_of("name", ValueKind::Text));
    params.bind("name", "Diana").unwrap();
    assert!(params.is_instance_of("name", ValueKind::Text));
    assert!(!params.is_instance_of("name", ValueKind::Int));
}

#[test]
fn repeated_parameter_shares_one_slot() {
    let prepared = prepare("select * from God where name = @name or alias = @name").unwrap();
    assert_eq!(prepared.params().len(), 1);
    assert_eq!(prepared.statement().parameters(), vec!["name"]);
}

#[test]
fn bind_resolves_every_position() {
    let statement = parse(
        "select * from God where name = @name and age between @min and @max and id in @ids",
    );
    let mut params = Params::new();
    for name in statement.parameters() {
        params.add(name);
    }
    params.bind("name", "Diana").unwrap();
    params.bind("min", 10).unwrap();
    params.bind("max", 20).unwrap();
    params.bind("ids", vec![1, 2]).unwrap();

    let bound = statement.bind(&params).unwrap();
    assert!(bound.parameters().is_empty());
    let Statement::Select(select) = bound else {
        panic!("expected select");
    };
    let Some(Condition::And { conditions }) = select.condition else {
        panic!("expected and");
    };
    assert_eq!(conditions[0], Condition::eq("name", "Diana"));
    assert_eq!(conditions[1], Condition::between("age", [10, 20]).unwrap());
    assert_eq!(
        conditions[2],
        Condition::in_value("id", QueryValue::literal(vec![1, 2])).unwrap()
    );
}

#[test]
fn json_array_binds_to_in_list() {
    let statement = parse("select * from Person where age in @ages");
    let mut params = Params::new();
    for name in statement.parameters() {
        params.add(name);
    }
    params.bind("ages", serde_json::json!([10, 20])).unwrap();
    assert_eq!(params.value("ages").unwrap(), &Value::Array(vec![Value::Int(10), Value::Int(20)]));

    let Statement::Select(select) = statement.bind(&params).unwrap() else {
        panic!("expected select");
    };
    assert_eq!(select.condition, Some(Condition::in_list("age", [10, 20]).unwrap()));
}

#[test]
fn json_object_stays_json_when_bound() {
    let statement = parse("select * from Person where address = @address");
    let mut params = Params::new();
    params.add("address");
    params.bind("address", serde_json::json!({"city": "Rome"})).unwrap();
    let Statement::Select(select) = statement.bind(&params).unwrap() else {
        panic!("expected select");
    };
    assert_eq!(
        select.condition,
        Some(Condition::eq("address", QueryValue::Json(serde_json::json!({"city": "Rome"}))))
    );
}

#[test]
fn unresolved_parameter_fails_binding() {
    let statement = parse("del @id");
    let mut params = Params::new();
    params.add("id");
    assert!(matches!(
        statement.bind(&params),
        Err(QueryError::UnresolvedParameter(name)) if name == "id"
    ));
}

#[test]
fn in_parameter_must_be_a_list() {
    let statement = parse("select * from God where id in @ids");
    let mut params = Params::new();
    params.add("ids");
    params.bind("ids", 5).unwrap();
    assert!(matches!(
        statement.bind(&params),
        Err(QueryError::Semantic(_))
    ));
}

#[test]
fn prepared_lifecycle() {
    let mut prepared = prepare("put {\"Diana\", @value, 10 second}").unwrap();
    assert_eq!(prepared.state(), PreparedState::Parsed);
    prepared.bind("value", "Hunt").unwrap();
    assert_eq!(prepared.state(), PreparedState::Bound);
    assert!(prepared.params().is_bound("value"));
}

#[test]
fn prepared_without_parameters_is_bound() {
    let prepared = prepare("get 1").unwrap();
    assert_eq!(prepared.state(), PreparedState::Bound);
    assert!(prepared.params().is_empty());
}
