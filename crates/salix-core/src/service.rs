//! The service contract implemented by every backing store

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::{Attributes, Configuration, SalixResource, Template, Url};

/// CRUD and listing over scoped Salix content.
///
/// Read and listing methods never fail: a missing or unreadable entity is
/// reported as `None` or left out of the listing. Save methods report
/// failures through `Self::Error`.
pub trait SalixService {
    type Resource: SalixResource;
    type Error: std::error::Error + Send + Sync + 'static;

    /// All known scopes.
    fn scopes(&self) -> BTreeSet<String>;

    /// Configurations named `target` (case-insensitively) across all scopes.
    fn configurations_for(&self, target: &str) -> Vec<Configuration>;

    fn configuration(&self, scope: &str, target: &str) -> Option<Configuration>;

    fn save_configuration(
        &self,
        scope: &str,
        target: &str,
        map: Attributes,
    ) -> Result<Configuration, Self::Error>;

    /// URLs currently being served. Every stored URL counts as active.
    fn active_urls(&self) -> Vec<Url> {
        self.all_urls()
    }

    fn all_urls(&self) -> Vec<Url> {
        self.scopes()
            .iter()
            .flat_map(|scope| self.urls_in(scope))
            .collect()
    }

    fn url(&self, url: &str, scope: &str) -> Option<Url>;

    fn save_url(&self, url: Url) -> Result<Url, Self::Error>;

    /// Build a [`Url`] from parts and save it. Timestamps are not stored.
    #[allow(clippy::too_many_arguments)]
    fn save_url_parts(
        &self,
        scope: &str,
        url: &str,
        status: i32,
        view: Option<&str>,
        _published: Option<NaiveDateTime>,
        _removed: Option<NaiveDateTime>,
        map: Attributes,
    ) -> Result<Url, Self::Error> {
        self.save_url(Url::new(scope, url, status, view.map(str::to_string), map))
    }

    /// A scoped template, or a global one when `scope` is `None`.
    fn template(&self, name: &str, scope: Option<&str>) -> Option<Template>;

    fn save_template(&self, scope: &str, name: &str, source: &str) -> Result<Template, Self::Error>;

    /// A handle to a resource. Existence is not checked here.
    fn resource(&self, source_id: &str, scope: &str) -> Self::Resource;

    /// Store an attribute bag as a resource payload.
    fn save_resource(
        &self,
        scope: &str,
        source_id: &str,
        source_uri: &str,
        map: &Attributes,
    ) -> Result<Self::Resource, Self::Error>;

    fn save_resource_text(
        &self,
        scope: &str,
        source_id: &str,
        source_uri: &str,
        content_type: Option<&str>,
        text: &str,
    ) -> Result<Self::Resource, Self::Error> {
        self.save_resource_bytes(scope, source_id, source_uri, content_type, text.as_bytes())
    }

    fn save_resource_bytes(
        &self,
        scope: &str,
        source_id: &str,
        source_uri: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self::Resource, Self::Error>;

    fn templates_in(&self, scope: &str) -> Vec<Template>;

    fn resources_in(&self, scope: &str) -> Vec<Self::Resource>;

    fn urls_in(&self, scope: &str) -> Vec<Url>;

    fn configurations_in(&self, scope: &str) -> Vec<Configuration>;
}
