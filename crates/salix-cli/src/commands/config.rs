//! Configuration commands

use salix_core::{Attributes, SalixService};
use salix_repository::FsSalixService;
use serde_json::Value;

use super::print_json;
use crate::error::{CliError, Result};

pub fn run_config_get(service: &FsSalixService, scope: &str, target: &str) -> Result<()> {
    let configuration = service
        .configuration(scope, target)
        .ok_or_else(|| CliError::not_found(format!("Configuration {scope}/{target}")))?;
    print_json(&configuration)
}

pub fn run_config_find(service: &FsSalixService, target: &str) -> Result<()> {
    print_json(&service.configurations_for(target))
}

pub fn run_config_set(
    service: &FsSalixService,
    scope: &str,
    target: &str,
    entries: &[String],
) -> Result<()> {
    let map = parse_entries(entries)?;
    let configuration = service.save_configuration(scope, target, map)?;
    print_json(&configuration)
}

/// Parse `KEY=VALUE` pairs. Values that are not valid JSON stay strings.
fn parse_entries(entries: &[String]) -> Result<Attributes> {
    entries
        .iter()
        .map(|entry| {
            let (key, raw) = entry
                .split_once('=')
                .ok_or_else(|| CliError::user(format!("Expected KEY=VALUE, got '{entry}'")))?;
            if key.is_empty() {
                return Err(CliError::user(format!("Missing key in '{entry}'")));
            }
            let value =
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            Ok((key.to_string(), value))
        })
        .collect()
}
