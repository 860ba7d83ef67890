#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use oxide_nql_core::ast::{
    Condition, ConditionVisitor, DelStatement, DeleteStatement, GetStatement, InsertStatement,
    Operator, PutStatement, QueryValue, SelectStatement, Statement, UpdateStatement,
};
use oxide_nql_core::execution::{BucketManager, Capabilities, DatabaseManager, ResultStream};
use oxide_nql_core::{BackendError, Entity, KeyValue, Parser, QueryError, Value};

pub fn parse(text: &str) -> Statement {
    Parser::new(text)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {text}\nError: {e:?}"))
}

pub fn parse_err(text: &str) -> QueryError {
    match Parser::new(text).parse_statement() {
        Ok(statement) => panic!("Expected an error for: {text}\nParsed: {statement:?}"),
        Err(e) => e,
    }
}

pub fn parse_select(text: &str) -> SelectStatement {
    match parse(text) {
        Statement::Select(s) => s,
        other => panic!("Expected select, got {other:?}"),
    }
}

pub fn parse_delete(text: &str) -> DeleteStatement {
    match parse(text) {
        Statement::Delete(d) => d,
        other => panic!("Expected delete, got {other:?}"),
    }
}

pub fn parse_insert(text: &str) -> InsertStatement {
    match parse(text) {
        Statement::Insert(i) => i,
        other => panic!("Expected insert, got {other:?}"),
    }
}

pub fn parse_update(text: &str) -> UpdateStatement {
    match parse(text) {
        Statement::Update(u) => u,
        other => panic!("Expected update, got {other:?}"),
    }
}

pub fn parse_get(text: &str) -> GetStatement {
    match parse(text) {
        Statement::Get(g) => g,
        other => panic!("Expected get, got {other:?}"),
    }
}

pub fn parse_put(text: &str) -> PutStatement {
    match parse(text) {
        Statement::Put(p) => p,
        other => panic!("Expected put, got {other:?}"),
    }
}

pub fn parse_del(text: &str) -> DelStatement {
    match parse(text) {
        Statement::Del(d) => d,
        other => panic!("Expected del, got {other:?}"),
    }
}

/// Verifies that `to_string()` reparses to an equal statement and is a
/// fixed point.
pub fn round_trip(text: &str) {
    let ast1 = parse(text);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the statement.\n  Input:    {text}\n  Rendered: {rendered1}"
    );
    assert_eq!(rendered1, ast2.to_string());
}

// ===================================================================
// In-memory backends
// ===================================================================

/// Evaluates a bound condition against an entity.
struct Matcher<'a> {
    entity: &'a Entity,
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn like(text: &str, pattern: &str) -> bool {
    match (pattern.strip_prefix('%'), pattern.strip_suffix('%')) {
        (Some(rest), Some(_)) => text.contains(rest.trim_end_matches('%')),
        (Some(suffix), None) => text.ends_with(suffix),
        (None, Some(prefix)) => text.starts_with(prefix),
        (None, None) => text == pattern,
    }
}

impl Matcher<'_> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.entity.get(name)
    }
}

impl ConditionVisitor for Matcher<'_> {
    type Output = bool;

    fn compare(&mut self, name: &str, operator: Operator, value: &QueryValue) -> bool {
        let (Some(field), Ok(value)) = (self.field(name), value.get()) else {
            return false;
        };
        match operator {
            Operator::Equals => *field == value,
            Operator::Like => match (field.as_str(), value.as_str()) {
                (Some(text), Some(pattern)) => like(text, pattern),
                _ => false,
            },
            _ => {
                let ordering = match (number(field), number(&value)) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => field.as_str().zip(value.as_str()).map(|(a, b)| a.cmp(b)),
                };
                ordering.is_some_and(|ordering| match operator {
                    Operator::GreaterThan => ordering.is_gt(),
                    Operator::GreaterEqualsThan => ordering.is_ge(),
                    Operator::LesserThan => ordering.is_lt(),
                    Operator::LesserEqualsThan => ordering.is_le(),
                    _ => false,
                })
            }
        }
    }

    fn in_list(&mut self, name: &str, values: &QueryValue) -> bool {
        match (self.field(name), values.get()) {
            (Some(field), Ok(Value::Array(items))) => items.contains(field),
            _ => false,
        }
    }

    fn between(&mut self, name: &str, low: &QueryValue, high: &QueryValue) -> bool {
        let field = self.field(name).and_then(number);
        let low = low.get().ok().as_ref().and_then(number);
        let high = high.get().ok().as_ref().and_then(number);
        match (field, low, high) {
            (Some(field), Some(low), Some(high)) => low <= field && field <= high,
            _ => false,
        }
    }

    fn and(&mut self, children: Vec<bool>) -> bool {
        children.into_iter().all(|c| c)
    }

    fn or(&mut self, children: Vec<bool>) -> bool {
        children.into_iter().any(|c| c)
    }

    fn not(&mut self, child: bool) -> bool {
        !child
    }
}

pub fn matches(entity: &Entity, condition: Option<&Condition>) -> bool {
    match condition {
        Some(condition) => condition.fold(&mut Matcher { entity }),
        None => true,
    }
}

/// An entity store that records every call it receives.
pub struct MemoryDatabase {
    pub capabilities: Capabilities,
    pub entities: Mutex<Vec<Entity>>,
    pub calls: Mutex<Vec<String>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            entities: Mutex::new(vec![]),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn seeded(entities: Vec<Entity>) -> Self {
        let db = Self::new();
        *db.entities.lock().unwrap() = entities;
        db
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DatabaseManager for MemoryDatabase {
    fn name(&self) -> &str {
        "memory"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn insert(&self, entity: Entity, ttl: Option<Duration>) -> Result<Entity, BackendError> {
        self.record(format!("insert {} {ttl:?}", entity.to_json()));
        self.entities.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    fn update(&self, entity: Entity) -> Result<Entity, BackendError> {
        self.record(format!("update {}", entity.to_json()));
        Ok(entity)
    }

    fn delete(&self, statement: &DeleteStatement) -> Result<Option<u64>, BackendError> {
        self.record(format!("delete {statement}"));
        let mut entities = self.entities.lock().unwrap();
        let before = entities.len();
        entities.retain(|e| e.name != statement.entity || !matches(e, statement.condition.as_ref()));
        Ok(Some((before - entities.len()) as u64))
    }

    fn select(&self, statement: &SelectStatement) -> Result<ResultStream<Entity>, BackendError> {
        self.record(format!("select {statement}"));
        let found: Vec<Entity> = self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name == statement.entity && matches(e, statement.condition.as_ref()))
            .cloned()
            .collect();
        let skip = usize::try_from(statement.skip)?;
        let limit = match statement.limit {
            0 => usize::MAX,
            n => usize::try_from(n)?,
        };
        Ok(Box::new(
            found.into_iter().skip(skip).take(limit).map(Ok::<_, BackendError>),
        ))
    }
}

/// A key-value store that records every call it receives.
pub struct RecordingBucket {
    pub capabilities: Capabilities,
    pub entries: Mutex<Vec<KeyValue>>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingBucket {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            entries: Mutex::new(vec![]),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn key_list(keys: &[Value]) -> String {
    keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl BucketManager for RecordingBucket {
    fn name(&self) -> &str {
        "recording"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn put(&self, entry: KeyValue, ttl: Option<Duration>) -> Result<(), BackendError> {
        self.record(format!("put({}, {}, {ttl:?})", entry.key, entry.value));
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.key != entry.key);
        entries.push(entry);
        Ok(())
    }

    fn get(&self, keys: &[Value]) -> Result<ResultStream<Value>, BackendError> {
        self.record(format!("get([{}])", key_list(keys)));
        let entries = self.entries.lock().unwrap();
        let found: Vec<Value> = keys
            .iter()
            .filter_map(|key| entries.iter().find(|e| &e.key == key))
            .map(|e| e.value.clone())
            .collect();
        Ok(Box::new(found.into_iter().map(Ok::<_, BackendError>)))
    }

    fn delete(&self, keys: &[Value]) -> Result<(), BackendError> {
        self.record(format!("delete([{}])", key_list(keys)));
        self.entries.lock().unwrap().retain(|e| !keys.contains(&e.key));
        Ok(())
    }
}
