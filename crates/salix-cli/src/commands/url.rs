//! URL commands

use salix_core::{SalixService, Url};
use salix_repository::FsSalixService;

use super::print_json;
use crate::error::{CliError, Result};

pub fn run_url_get(service: &FsSalixService, scope: &str, url: &str) -> Result<()> {
    let found = service
        .url(url, scope)
        .ok_or_else(|| CliError::not_found(format!("URL {scope}:{url}")))?;
    print_json(&found)
}

pub fn run_url_set(
    service: &FsSalixService,
    scope: &str,
    url: &str,
    view: &str,
    status: i32,
) -> Result<()> {
    let map = service
        .url(url, scope)
        .map(|existing| existing.map)
        .unwrap_or_default();
    let saved = service.save_url(Url::new(scope, url, status, Some(view.to_string()), map))?;
    print_json(&saved)
}
