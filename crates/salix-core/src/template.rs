//! Template source wrapper

use serde::{Deserialize, Serialize};

/// Template source text with its name and, for scoped templates, its scope.
///
/// Global templates live outside any scope and have `scope == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub name: String,
    #[serde(default)]
    pub source: String,
}

impl Template {
    pub fn new(scope: impl Into<String>, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn global(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            scope: None,
            name: name.into(),
            source: source.into(),
        }
    }
}
