//! Provider configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Names a provider and carries its free-form settings.
///
/// ```
/// use oxide_nql_core::config::ProviderSettings;
///
/// let settings = ProviderSettings::from_json(
///     r#"{"provider": "memory", "settings": {"capacity": 64}}"#,
/// )
/// .unwrap();
/// assert_eq!(settings.provider, "memory");
/// assert_eq!(settings.get_u64("capacity"), Some(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// The provider tag the registry resolves.
    pub provider: String,
    /// Provider-specific settings.
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl ProviderSettings {
    /// Creates settings for `provider` with no entries.
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            settings: BTreeMap::new(),
        }
    }

    /// Adds a setting.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Config`](crate::QueryError::Config) for
    /// malformed JSON or a missing `provider`.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns a raw setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.settings.get(key)
    }

    /// Returns a string setting.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }

    /// Returns an unsigned integer setting.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(serde_json::Value::as_u64)
    }
}
