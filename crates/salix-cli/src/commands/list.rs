//! Scope and entity listings

use colored::Colorize;
use salix_core::{SalixResource, SalixService};
use salix_repository::{EntityKind, FsResource, FsSalixService};
use serde_json::{Value, json};

use super::print_json;
use crate::error::Result;

pub fn run_scopes(service: &FsSalixService) -> Result<()> {
    let scopes = service.scopes();
    if scopes.is_empty() {
        eprintln!("{}", "No scopes found".dimmed());
    }
    print_json(&scopes)
}

pub fn run_list(service: &FsSalixService, scope: &str, kind: EntityKind) -> Result<()> {
    match kind {
        EntityKind::Url => print_json(&service.urls_in(scope)),
        EntityKind::Template => print_json(&service.templates_in(scope)),
        EntityKind::Configuration => print_json(&service.configurations_in(scope)),
        EntityKind::Resource => {
            let resources: Vec<Value> = service
                .resources_in(scope)
                .iter()
                .map(describe_resource)
                .collect();
            print_json(&resources)
        }
    }
}

pub(crate) fn describe_resource(resource: &FsResource) -> Value {
    json!({
        "scope": resource.scope(),
        "source_id": resource.source_id(),
        "source_uri": resource.source_uri(),
        "resource_uri": resource.resource_uri(),
        "resource_type": resource.resource_type().name(),
    })
}
