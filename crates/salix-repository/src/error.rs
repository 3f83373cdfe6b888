//! Error types for salix-repository

use std::path::PathBuf;

use crate::EntityKind;

/// Result type for salix-repository operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in salix-repository operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The logical key of an entity was empty
    #[error("{kind} key must not be empty")]
    EmptyKey { kind: EntityKind },

    /// A resource payload was requested but is not stored
    #[error("Resource {source_id} not found in scope {scope}")]
    ResourceNotFound { scope: String, source_id: String },

    /// Settings file could not be used
    #[error("Invalid settings at {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// Byte store error from salix-fs
    #[error(transparent)]
    Fs(#[from] salix_fs::Error),
}
