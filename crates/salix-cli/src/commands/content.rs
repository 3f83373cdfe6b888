//! Template and resource payload commands

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use salix_core::{SalixResource, SalixService};
use salix_repository::FsSalixService;

use super::list::describe_resource;
use super::print_json;
use crate::error::{CliError, Result};

/// Print a template's source verbatim.
pub fn run_template_get(service: &FsSalixService, scope: &str, name: &str) -> Result<()> {
    let template = service
        .template(name, Some(scope))
        .ok_or_else(|| CliError::not_found(format!("Template {scope}/{name}")))?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(template.source.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn run_template_put(service: &FsSalixService, scope: &str, name: &str, file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)?;
    let template = service.save_template(scope, name, &source)?;
    print_json(&template)
}

/// Copy a resource's payload to stdout.
pub fn run_resource_cat(service: &FsSalixService, scope: &str, key: &str) -> Result<()> {
    let resource = service.resource(key, scope);
    if !resource.exists() {
        return Err(CliError::not_found(format!("Resource {scope}/{key}")));
    }
    let mut stdout = io::stdout().lock();
    resource.write_to(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}

pub fn run_resource_put(service: &FsSalixService, scope: &str, key: &str, file: &Path) -> Result<()> {
    let bytes = fs::read(file)?;
    let source_uri = file.display().to_string();
    let resource = service.save_resource_bytes(scope, key, &source_uri, None, &bytes)?;
    print_json(&describe_resource(&resource))
}
