//! Convention-based filesystem repository for Salix content
//!
//! Entities are stored as files under a root directory, one directory per
//! scope and one subfolder per entity kind:
//!
//! ```text
//! <root>/
//!   <scope>/
//!     urls/             # YAML (or JSON) documents, "index" names a folder's URL
//!       index.yml
//!       blog/index.yml
//!     templates/        # raw template source
//!       home.html
//!     configurations/   # JSON documents {scope, target, map}
//!       mail.json
//!     resources/        # opaque payloads, type guessed from the extension
//!       logo.png
//!   templates/          # global templates, outside any scope
//! ```
//!
//! Folder names and file suffixes are configurable per kind through
//! [`FsSettings`].

pub mod error;
pub mod kind;
pub mod resource;
pub mod service;
pub mod settings;

pub use error::{Error, Result};
pub use kind::{EntityKind, canonical_url_key};
pub use resource::FsResource;
pub use service::FsSalixService;
pub use settings::{FsSettings, KindLayout};
