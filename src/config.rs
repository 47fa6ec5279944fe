//! Locator configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::PropertyKeys;
use crate::util::Result;

/// Settings for [`AuxiliaryDataLocator`](crate::locator::AuxiliaryDataLocator).
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Keys used to walk the top-level property tree.
    ///
    /// Must match the source's keys; see
    /// [`MemorySource::with_config`](crate::source::MemorySource::with_config).
    pub keys: PropertyKeys,
    /// Convert depth to disparity (and back) when only the other one exists.
    pub allow_conversion: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            keys: PropertyKeys::default(),
            allow_conversion: true,
        }
    }
}

impl LocatorConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
