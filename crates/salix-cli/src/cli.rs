//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use salix_repository::EntityKind;

/// Inspect and edit a filesystem-backed Salix store
#[derive(Parser, Debug)]
#[command(name = "salix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store root directory
    #[arg(long, global = true, env = "SALIX_FS_PATH")]
    pub root: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List all scopes in the store
    Scopes,

    /// List the entities of one kind in a scope
    List {
        scope: String,
        kind: KindArg,
    },

    /// Read and write configurations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Read and write URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Read and write templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Read and write resources
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

/// Entity kind as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Urls,
    Templates,
    Configurations,
    Resources,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Urls => EntityKind::Url,
            KindArg::Templates => EntityKind::Template,
            KindArg::Configurations => EntityKind::Configuration,
            KindArg::Resources => EntityKind::Resource,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print one configuration
    Get { scope: String, target: String },

    /// Print the configurations for a target across all scopes
    Find { target: String },

    /// Replace a configuration's attributes
    ///
    /// Values are parsed as JSON and kept as strings when they are not valid
    /// JSON:
    ///   salix config set site mail host=smtp.local port=25 tls=true
    Set {
        scope: String,
        target: String,
        /// Attributes as KEY=VALUE
        #[arg(value_name = "KEY=VALUE")]
        entries: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UrlAction {
    /// Print one URL
    Get { scope: String, url: String },

    /// Create or update a URL, keeping existing attributes
    Set {
        scope: String,
        url: String,
        /// View rendering the URL
        #[arg(long)]
        view: String,
        /// HTTP status
        #[arg(long, default_value_t = salix_core::url::DEFAULT_STATUS)]
        status: i32,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    /// Print a template's source
    Get { scope: String, name: String },

    /// Store a template's source from a file
    Put {
        scope: String,
        name: String,
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// Write a resource's payload to stdout
    Cat { scope: String, key: String },

    /// Store a resource's payload from a file
    Put {
        scope: String,
        key: String,
        file: PathBuf,
    },
}
