//! Path-addressed filesystem byte store for Salix content
//!
//! Provides segment-based path composition, atomic locked writes, directory
//! listings and format-agnostic document encoding.

pub mod client;
pub mod codec;
pub mod error;
pub mod io;
pub mod path;

pub use client::{FsClient, LocalFsClient};
pub use codec::Format;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::{StorePath, join_segments, validate_path_identifier};
