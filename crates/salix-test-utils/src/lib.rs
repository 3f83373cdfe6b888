//! Shared test utilities for the salix workspace.
//!
//! This crate provides a scratch content store so crate test suites do not
//! each rebuild the same directory layout. It is a dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`store`]: [`TestStore`] builder for a temporary store root

pub mod store;

pub use store::TestStore;
