//! Deferred parameter slots.
//!
//! The parser registers a slot for every `@name` it meets; callers fill
//! the slots before execution.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{QueryError, Result};
use crate::value::{ToValue, Value, ValueKind};

/// A reference to a registered parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamHandle {
    name: String,
    index: usize,
}

impl ParamHandle {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the registration order of the parameter.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    value: Option<Value>,
}

/// Named parameter slots of a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl Params {
    /// Creates an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, returning the existing handle if it is already
    /// registered.
    pub fn add(&mut self, name: impl Into<String>) -> ParamHandle {
        let name = name.into();
        if let Some(&index) = self.index.get(&name) {
            return ParamHandle { name, index };
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            name: name.clone(),
            value: None,
        });
        self.index.insert(name.clone(), index);
        ParamHandle { name, index }
    }

    /// Returns the handle of a registered parameter.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<ParamHandle> {
        self.index.get(name).map(|&index| ParamHandle {
            name: String::from(name),
            index,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Slot> {
        match self.index.get(name) {
            Some(&index) => Ok(&mut self.slots[index]),
            None => Err(QueryError::UnknownParameter(String::from(name))),
        }
    }

    /// Binds a value to a registered parameter.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameter`] if `name` was never
    /// registered and [`QueryError::ParameterAlreadyBound`] if it already
    /// holds a value.
    pub fn bind(&mut self, name: &str, value: impl ToValue) -> Result<()> {
        let slot = self.slot_mut(name)?;
        if slot.value.is_some() {
            return Err(QueryError::ParameterAlreadyBound(String::from(name)));
        }
        slot.value = Some(value.to_value());
        debug!(parameter = name, "bound parameter");
        Ok(())
    }

    /// Binds a value to a registered parameter, replacing any previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameter`] if `name` was never
    /// registered.
    pub fn rebind(&mut self, name: &str, value: impl ToValue) -> Result<()> {
        let slot = self.slot_mut(name)?;
        slot.value = Some(value.to_value());
        debug!(parameter = name, "rebound parameter");
        Ok(())
    }

    /// Reads the value behind a handle.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnresolvedParameter`] if the slot is not bound
    /// and [`QueryError::UnknownParameter`] if the handle belongs to other
    /// parameters.
    pub fn get(&self, handle: &ParamHandle) -> Result<&Value> {
        match self.slots.get(handle.index) {
            Some(slot) if slot.name == handle.name => slot
                .value
                .as_ref()
                .ok_or_else(|| QueryError::UnresolvedParameter(handle.name.clone())),
            _ => Err(QueryError::UnknownParameter(handle.name.clone())),
        }
    }

    /// Reads the value of a parameter by name.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnresolvedParameter`] if the parameter has no
    /// value, whether or not it was registered.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.index
            .get(name)
            .and_then(|&index| self.slots[index].value.as_ref())
            .ok_or_else(|| QueryError::UnresolvedParameter(String::from(name)))
    }

    /// Returns true if `name` is registered and bound.
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.value(name).is_ok()
    }

    /// Returns true if `name` is bound to a value of type `kind`.
    ///
    /// Unknown and unbound parameters answer `false` instead of failing.
    #[must_use]
    pub fn is_instance_of(&self, name: &str, kind: ValueKind) -> bool {
        self.value(name).is_ok_and(|value| value.is_instance_of(kind))
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Returns the names that have no value yet.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|slot| slot.value.is_none())
            .map(|slot| slot.name.as_str())
            .collect()
    }

    /// Checks that every registered parameter has a value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnresolvedParameter`] naming the first
    /// unbound parameter.
    pub fn ensure_resolved(&self) -> Result<()> {
        match self.slots.iter().find(|slot| slot.value.is_none()) {
            Some(slot) => Err(QueryError::UnresolvedParameter(slot.name.clone())),
            None => Ok(()),
        }
    }

    /// Returns the number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no parameter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Clears every bound value, keeping the registrations.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.value = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_bind_get() {
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
    fn test_add_is_idempotent() {
        let mut params = Params::new();
        let first = params.add("id");
        let second = params.add("id");
        assert_eq!(first, second);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_bind_unknown_parameter() {
        let mut params = Params::new();
        assert!(matches!(
            params.bind("missing", 1),
            Err(QueryError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_bind_twice_fails_but_rebind_overwrites() {
        let mut params = Params::new();
        params.add("name");
        params.bind("name", "Diana").unwrap();
        assert!(matches!(
            params.bind("name", "Artemis"),
            Err(QueryError::ParameterAlreadyBound(_))
        ));
        params.rebind("name", "Artemis").unwrap();
        assert_eq!(params.value("name").unwrap().as_str(), Some("Artemis"));
    }

    #[test]
    fn test_is_instance_of_does_not_fail() {
        let mut params = Params::new();
        params.add("age");
        assert!(!params.is_instance_of("age", ValueKind::Int));
        assert!(!params.is_instance_of("unknown", ValueKind::Int));
        params.bind("age", 3).unwrap();
        assert!(params.is_instance_of("age", ValueKind::Int));
    }

    #[test]
    fn test_unresolved_and_reset() {
        let mut params = Params::new();
        params.add("a");
        params.add("b");
        params.bind("a", true).unwrap();
        assert_eq!(params.unresolved(), vec!["b"]);
        assert!(params.ensure_resolved().is_err());
        params.bind("b", false).unwrap();
        assert!(params.ensure_resolved().is_ok());
        params.reset();
        assert_eq!(params.unresolved(), vec!["a", "b"]);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let mut other = Params::new();
        let handle = other.add("x");
        let mut params = Params::new();
        params.add("y");
        assert!(matches!(
            params.get(&handle),
            Err(QueryError::UnknownParameter(_))
        ));
    }
}
