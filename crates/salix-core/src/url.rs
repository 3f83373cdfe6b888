//! Routed URL entries

use chrono::{Local, Months, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Attributes;

/// Status used when a stored status is missing or not positive.
pub const DEFAULT_STATUS: i32 = 200;

/// A routed path within a scope.
///
/// Publication timestamps are not persisted: every stored URL is treated as
/// published a year ago and never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub scope: String,
    pub url: String,
    #[serde(default = "default_status", deserialize_with = "positive_or_default")]
    status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default)]
    pub map: Attributes,
}

fn default_status() -> i32 {
    DEFAULT_STATUS
}

fn positive_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let status = Option::<i32>::deserialize(deserializer)?;
    Ok(normalize_status(status.unwrap_or(DEFAULT_STATUS)))
}

fn normalize_status(status: i32) -> i32 {
    if status > 0 { status } else { DEFAULT_STATUS }
}

impl Url {
    pub fn new(
        scope: impl Into<String>,
        url: impl Into<String>,
        status: i32,
        view: Option<String>,
        map: Attributes,
    ) -> Self {
        Self {
            scope: scope.into(),
            url: url.into(),
            status: normalize_status(status),
            view,
            map,
        }
    }

    /// HTTP status, never below 1.
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = normalize_status(status);
    }

    /// Synthesized publication time: one year before now.
    pub fn published(&self) -> Option<NaiveDateTime> {
        Local::now().naive_local().checked_sub_months(Months::new(12))
    }

    /// Removal time; stored URLs are never removed.
    pub fn removed(&self) -> Option<NaiveDateTime> {
        None
    }

    /// True when the URL denotes a folder index (`""` or a trailing `/`).
    pub fn is_index(&self) -> bool {
        self.url.is_empty() || self.url.ends_with('/')
    }
}
