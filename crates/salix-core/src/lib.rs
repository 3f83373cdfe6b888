//! Entity model and service contracts for Salix content stores
//!
//! Salix content is partitioned by *scope* (a tenant or site) and comes in
//! four kinds:
//!
//! - [`Configuration`]: a named attribute bag for a target
//! - [`Template`]: template source text
//! - [`Url`]: a routed path with status, view and attributes
//! - resources: opaque payloads, accessed through [`SalixResource`] handles
//!
//! Backing stores implement [`SalixService`].

pub mod configuration;
pub mod resource;
pub mod service;
pub mod template;
pub mod url;

pub use configuration::Configuration;
pub use resource::{ResourceType, ResourceWriter, SalixResource};
pub use service::SalixService;
pub use template::Template;
pub use url::Url;

/// Loosely-typed key/value attributes attached to entities.
pub type Attributes = std::collections::BTreeMap<String, serde_json::Value>;
