//! Statement dispatch to backends.

use std::time::Duration;

use tracing::{debug, warn};

use super::backend::{BucketManager, Capabilities, Capability, DatabaseManager};
use super::result::ExecutionResult;
use crate::ast::{Condition, InsertStatement, Payload, QueryValue, Statement, UpdateStatement};
use crate::entity::{Entity, KeyValue, ToEntity};
use crate::error::{QueryError, Result};
use crate::params::Params;
use crate::value::Value;

/// Returns the optional capabilities `statement` needs.
#[must_use]
pub fn required_capabilities(statement: &Statement) -> Vec<Capability> {
    let mut required = vec![];
    match statement {
        Statement::Select(select) => {
            if !select.sorts.is_empty() {
                required.push(Capability::Ordering);
            }
            if select.is_paginated() {
                required.push(Capability::Pagination);
            }
        }
        Statement::Insert(insert) if insert.ttl.is_some() => required.push(Capability::Ttl),
        Statement::Put(put) if put.ttl.is_some() => required.push(Capability::Ttl),
        _ => {}
    }
    if statement.condition().is_some_and(|c| c.contains_logical()) {
        required.push(Capability::LogicalComposition);
    }
    required
}

fn refuse(backend: &str, capability: Capability) -> QueryError {
    warn!(backend, %capability, "backend refused statement");
    QueryError::UnsupportedCapability(capability)
}

fn check_capabilities(statement: &Statement, backend: &str, capabilities: Capabilities) -> Result<()> {
    match required_capabilities(statement)
        .into_iter()
        .find(|capability| !capabilities.supports(*capability))
    {
        Some(capability) => Err(refuse(backend, capability)),
        None => Ok(()),
    }
}

fn payload_entity(name: &str, payload: &Payload) -> Result<Entity> {
    match payload {
        Payload::Conditions(conditions) => Entity::from_conditions(name, conditions),
        Payload::Json(json) => Entity::from_json(name, &json.get()?.to_json()),
    }
}

fn resolve_keys(keys: &[QueryValue]) -> Result<Vec<Value>> {
    keys.iter().map(QueryValue::get).collect()
}

/// Executes an entity statement.
///
/// Capability checks and parameter binding happen before the backend is
/// called; backend errors are returned unchanged as
/// [`QueryError::Backend`].
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedCapability`] for key-value statements
/// or features the backend lacks, binding errors for unresolved
/// parameters, and any backend error.
pub fn execute(
    statement: &Statement,
    params: &Params,
    manager: &dyn DatabaseManager,
) -> Result<ExecutionResult<Entity>> {
    let backend = manager.name();
    if statement.is_key_value() {
        return Err(refuse(backend, Capability::Statement(statement.kind())));
    }
    check_capabilities(statement, backend, manager.capabilities())?;
    let bound = statement.bind(params)?;
    debug!(backend, statement = %bound, "executing statement");

    match bound {
        Statement::Select(select) => Ok(ExecutionResult::Stream(manager.select(&select)?)),
        Statement::Insert(insert) => {
            let entity = payload_entity(&insert.entity, &insert.payload)?;
            Ok(ExecutionResult::Echo(manager.insert(entity, insert.ttl)?))
        }
        Statement::Update(update) => {
            let entity = payload_entity(&update.entity, &update.payload)?;
            Ok(ExecutionResult::Echo(manager.update(entity)?))
        }
        Statement::Delete(delete) => Ok(match manager.delete(&delete)? {
            Some(count) => ExecutionResult::Count(count),
            None => ExecutionResult::Done,
        }),
        other => Err(refuse(backend, Capability::Statement(other.kind()))),
    }
}

/// Turns an application record into the entity name and assignments of a
/// write statement.
fn record_payload(record: &impl ToEntity) -> Result<(String, Payload)> {
    let entity = record.to_entity();
    if entity.name.is_empty() {
        return Err(QueryError::PreconditionViolation(String::from(
            "a record must name its entity",
        )));
    }
    if entity.is_empty() {
        return Err(QueryError::PreconditionViolation(format!(
            "a `{}` record has no fields to write",
            entity.name
        )));
    }
    let assignments = entity
        .elements
        .into_iter()
        .map(|element| Condition::eq(element.name, element.value))
        .collect();
    Ok((entity.name, Payload::Conditions(assignments)))
}

fn echoed(result: ExecutionResult<Entity>) -> Result<Entity> {
    result
        .single_result()?
        .ok_or_else(|| QueryError::Semantic(String::from("backend echoed no entity")))
}

/// Inserts `record` as an `insert` statement with an optional time to
/// live, returning the entity the backend stored.
///
/// # Errors
///
/// Returns [`QueryError::PreconditionViolation`] for a record without an
/// entity name or fields, plus every error of [`execute`].
pub fn insert(
    record: &impl ToEntity,
    ttl: Option<Duration>,
    manager: &dyn DatabaseManager,
) -> Result<Entity> {
    let (entity, payload) = record_payload(record)?;
    let statement = Statement::Insert(InsertStatement {
        entity,
        payload,
        ttl,
    });
    echoed(execute(&statement, &Params::new(), manager)?)
}

/// Writes `record` as an `update` statement, returning the entity the
/// backend stored.
///
/// # Errors
///
/// Same as [`insert`].
pub fn update(record: &impl ToEntity, manager: &dyn DatabaseManager) -> Result<Entity> {
    let (entity, payload) = record_payload(record)?;
    let statement = Statement::Update(UpdateStatement { entity, payload });
    echoed(execute(&statement, &Params::new(), manager)?)
}

/// Executes a key-value statement.
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedCapability`] for entity statements or
/// a TTL the bucket cannot honor, binding errors for unresolved
/// parameters, and any backend error.
pub fn execute_kv(
    statement: &Statement,
    params: &Params,
    manager: &dyn BucketManager,
) -> Result<ExecutionResult<Value>> {
    let backend = manager.name();
    if !statement.is_key_value() {
        return Err(refuse(backend, Capability::Statement(statement.kind())));
    }
    check_capabilities(statement, backend, manager.capabilities())?;
    let bound = statement.bind(params)?;
    debug!(backend, statement = %bound, "executing statement");

    match bound {
        Statement::Get(get) => {
            let keys = resolve_keys(&get.keys)?;
            Ok(ExecutionResult::Stream(manager.get(&keys)?))
        }
        Statement::Put(put) => {
            let entry = KeyValue {
                key: put.key.get()?,
                value: put.value.get()?,
            };
            let echo = entry.value.clone();
            manager.put(entry, put.ttl)?;
            Ok(ExecutionResult::Echo(echo))
        }
        Statement::Del(del) => {
            let keys = resolve_keys(&del.keys)?;
            manager.delete(&keys)?;
            Ok(ExecutionResult::Done)
        }
        other => Err(refuse(backend, Capability::Statement(other.kind()))),
    }
}
