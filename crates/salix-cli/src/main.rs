//! Salix store CLI
//!
//! Inspect and edit a filesystem-backed Salix store from the shell.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ConfigAction, ResourceAction, TemplateAction, UrlAction};
use error::Result;
use salix_repository::FsSalixService;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let service = commands::open_service(cli.root, cli.config)?;
    execute_command(&service, cli.command)
}

fn execute_command(service: &FsSalixService, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Scopes => commands::run_scopes(service),
        Commands::List { scope, kind } => commands::run_list(service, &scope, kind.into()),
        Commands::Config { action } => match action {
            ConfigAction::Get { scope, target } => commands::run_config_get(service, &scope, &target),
            ConfigAction::Find { target } => commands::run_config_find(service, &target),
            ConfigAction::Set {
                scope,
                target,
                entries,
            } => commands::run_config_set(service, &scope, &target, &entries),
        },
        Commands::Url { action } => match action {
            UrlAction::Get { scope, url } => commands::run_url_get(service, &scope, &url),
            UrlAction::Set {
                scope,
                url,
                view,
                status,
            } => commands::run_url_set(service, &scope, &url, &view, status),
        },
        Commands::Template { action } => match action {
            TemplateAction::Get { scope, name } => commands::run_template_get(service, &scope, &name),
            TemplateAction::Put { scope, name, file } => {
                commands::run_template_put(service, &scope, &name, &file)
            }
        },
        Commands::Resource { action } => match action {
            ResourceAction::Cat { scope, key } => commands::run_resource_cat(service, &scope, &key),
            ResourceAction::Put { scope, key, file } => {
                commands::run_resource_put(service, &scope, &key, &file)
            }
        },
    }
}
