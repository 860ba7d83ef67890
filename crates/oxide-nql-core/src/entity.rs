//! Records exchanged with backends.

use serde::Serialize;

use crate::ast::{Condition, Operator};
use crate::error::{QueryError, Result};
use crate::value::{ToValue, Value};

/// A named field of an [`Entity`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// The field name.
    pub name: String,
    /// The field value.
    pub value: Value,
}

impl Element {
    /// Creates an element.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl ToValue) -> Self {
        Self {
            name: name.into(),
            value: value.to_value(),
        }
    }
}

/// A record of an entity backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// The entity (collection, table, column family) name.
    pub name: String,
    /// Fields in insertion order.
    pub elements: Vec<Element>,
}

impl Entity {
    /// Creates an entity without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: vec![],
        }
    }

    /// Adds a field, returning the entity.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToValue) -> Self {
        self.add(name, value);
        self
    }

    /// Sets a field, replacing an existing field of the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl ToValue) {
        let element = Element::new(name, value);
        match self.elements.iter_mut().find(|e| e.name == element.name) {
            Some(existing) => existing.value = element.value,
            None => self.elements.push(element),
        }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the entity has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Builds an entity from the members of a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if `json` is not an object.
    pub fn from_json(name: impl Into<String>, json: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(members) = json else {
            return Err(QueryError::Semantic(String::from(
                "a JSON payload must be an object",
            )));
        };
        let mut entity = Self::new(name);
        for (key, value) in members {
            entity.add(key.clone(), Value::from_json(value.clone()));
        }
        Ok(entity)
    }

    /// Builds an entity from `name = value` assignments.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Semantic`] if an assignment is not an
    /// equality and [`QueryError::UnresolvedParameter`] if its value is an
    /// unbound parameter.
    pub fn from_conditions(name: impl Into<String>, conditions: &[Condition]) -> Result<Self> {
        let mut entity = Self::new(name);
        for condition in conditions {
            match condition {
                Condition::Compare {
                    name,
                    operator: Operator::Equals,
                    value,
                } => entity.add(name.clone(), value.get()?),
                other => {
                    return Err(QueryError::Semantic(format!(
                        "`{other}` is not an assignment"
                    )));
                }
            }
        }
        Ok(entity)
    }

    /// Converts the fields into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.elements
                .iter()
                .map(|e| (e.name.clone(), e.value.to_json()))
                .collect(),
        )
    }
}

/// A record of a key-value backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    /// The key.
    pub key: Value,
    /// The stored value.
    pub value: Value,
}

impl KeyValue {
    /// Creates a key-value pair.
    #[must_use]
    pub fn new(key: impl ToValue, value: impl ToValue) -> Self {
        Self {
            key: key.to_value(),
            value: value.to_value(),
        }
    }
}

/// Conversion of an application type into an [`Entity`].
pub trait ToEntity {
    /// Performs the conversion.
    fn to_entity(&self) -> Entity;
}

/// Conversion of an [`Entity`] into an application type.
pub trait FromEntity: Sized {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not describe a valid `Self`.
    fn from_entity(entity: Entity) -> Result<Self>;
}

impl ToEntity for Entity {
    fn to_entity(&self) -> Entity {
        self.clone()
    }
}

impl FromEntity for Entity {
    fn from_entity(entity: Entity) -> Result<Self> {
        Ok(entity)
    }
}
