//! Command implementations for the salix CLI

mod config;
mod content;
mod list;
mod url;

use std::path::PathBuf;

use salix_repository::{FsSalixService, FsSettings};
use serde::Serialize;

use crate::error::Result;

pub use config::{run_config_find, run_config_get, run_config_set};
pub use content::{run_resource_cat, run_resource_put, run_template_get, run_template_put};
pub use list::{run_list, run_scopes};
pub use url::{run_url_get, run_url_set};

/// Build the service for this invocation.
///
/// An explicit root (flag or `SALIX_FS_PATH`) wins over the settings file,
/// which wins over the platform default.
pub fn open_service(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<FsSalixService> {
    let mut settings = match config {
        Some(path) => FsSettings::load(path)?,
        None => FsSettings::default(),
    };
    if let Some(root) = root {
        settings.root = root;
    }
    tracing::debug!(root = ?settings.root, "Opening store");
    Ok(FsSalixService::new(settings))
}

/// Print a value as pretty JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
