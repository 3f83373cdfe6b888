//! Per-target configuration bags

use serde::{Deserialize, Serialize};

use crate::Attributes;

/// A named bag of attributes for a `target` within a `scope`.
///
/// Saving a configuration fully replaces the previous content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub scope: String,
    pub target: String,
    #[serde(default)]
    pub map: Attributes,
}

impl Configuration {
    pub fn new(scope: impl Into<String>, target: impl Into<String>, map: Attributes) -> Self {
        Self {
            scope: scope.into(),
            target: target.into(),
            map,
        }
    }

    /// Look up a single attribute.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.map.get(key)
    }
}
