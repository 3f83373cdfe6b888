//! Filesystem implementation of [`SalixService`]

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use salix_core::{Attributes, Configuration, SalixService, Template, Url};
use salix_fs::{FsClient, Format, LocalFsClient, StorePath};
use serde::{Serialize, de::DeserializeOwned};

use crate::kind::{matches, strip_suffix};
use crate::{EntityKind, Error, FsResource, FsSettings, Result, canonical_url_key};

/// Salix content stored as files, one directory per scope.
///
/// Holds no state between calls: every operation is a fresh round-trip to
/// the byte store. Reads and listings swallow failures after logging them;
/// the `lookup_*` methods expose the same reads with errors intact.
#[derive(Debug, Clone)]
pub struct FsSalixService {
    client: Arc<dyn FsClient>,
    settings: FsSettings,
}

impl FsSalixService {
    /// Create a service over a local directory described by `settings`.
    pub fn new(settings: FsSettings) -> Self {
        let client = LocalFsClient::with_robustness(&settings.root, settings.robustness);
        Self::with_client(Arc::new(client), settings)
    }

    /// Create a service over any byte store. `settings.root` is not used.
    pub fn with_client(client: Arc<dyn FsClient>, settings: FsSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &FsSettings {
        &self.settings
    }

    pub fn client(&self) -> &Arc<dyn FsClient> {
        &self.client
    }

    /// Read a configuration; `Ok(None)` when it is not stored.
    pub fn lookup_configuration(&self, scope: &str, target: &str) -> Result<Option<Configuration>> {
        if target.is_empty() {
            return Ok(None);
        }
        let layout = &self.settings.configurations;
        self.read_document(
            Format::Json,
            &[scope, &layout.path, &layout.file_name(target)],
        )
    }

    /// Read a URL by its path; `Ok(None)` when it is not stored.
    pub fn lookup_url(&self, url: &str, scope: &str) -> Result<Option<Url>> {
        let layout = &self.settings.urls;
        let key = canonical_url_key(url);
        self.read_document(
            self.document_format(EntityKind::Url),
            &[scope, &layout.path, &layout.file_name(&key)],
        )
    }

    /// Read a template; `Ok(None)` when it is not stored.
    ///
    /// Scoped templates are raw source text. Global templates (no scope)
    /// are JSON documents `{name, source}` under the top-level template
    /// folder.
    pub fn lookup_template(&self, name: &str, scope: Option<&str>) -> Result<Option<Template>> {
        if name.is_empty() {
            return Ok(None);
        }
        let layout = &self.settings.templates;
        let file_name = layout.file_name(name);
        match scope {
            Some(scope) => {
                let source: Option<String> =
                    self.read_document(Format::Text, &[scope, &layout.path, &file_name])?;
                Ok(source.map(|source| Template::new(scope, name, source)))
            }
            None => self.read_document(Format::Json, &[&layout.path, &file_name]),
        }
    }

    /// A resource handle if the payload is stored, `Ok(None)` otherwise.
    pub fn lookup_resource(&self, source_id: &str, scope: &str) -> Result<Option<FsResource>> {
        let layout = &self.settings.resources;
        let file_name = layout.file_name(source_id);
        let segments = [scope, layout.path.as_str(), file_name.as_str()];
        match self.client.read(&segments)? {
            Some(_) => Ok(Some(self.resource(source_id, scope))),
            None => Ok(None),
        }
    }

    fn document_format(&self, kind: EntityKind) -> Format {
        kind.format(self.settings.layout(kind)).unwrap_or(Format::Text)
    }

    fn read_document<T: DeserializeOwned>(&self, format: Format, segments: &[&str]) -> Result<Option<T>> {
        let Some(content) = self.client.read_bytes(segments)? else {
            return Ok(None);
        };
        let path = StorePath::from_segments(segments)?;
        Ok(Some(format.decode(Path::new(path.as_str()), &content)?))
    }

    fn write_document<T: Serialize + ?Sized>(
        &self,
        format: Format,
        segments: &[&str],
        value: &T,
    ) -> Result<()> {
        let path = StorePath::from_segments(segments)?;
        // Serialize fully before touching the store so encoding errors
        // never leave a truncated entry behind
        let content = format.encode(Path::new(path.as_str()), value)?;
        self.client.write_bytes(&content, segments)?;
        tracing::debug!(path = %path, format = format.name(), "Saved document");
        Ok(())
    }

    /// Logical keys of `kind` in `scope`, filtered by the listing rule.
    fn listed_keys(&self, kind: EntityKind, scope: &str, exclusions: &[EntityKind]) -> Vec<String> {
        let layout = self.settings.layout(kind);
        let segments = [scope, layout.path.as_str()];
        // URLs may nest in folders mirroring the URL hierarchy
        let listed = if kind == EntityKind::Url {
            self.client.list_files_recursive(&segments)
        } else {
            self.client.list_files(&segments)
        };
        let names = match listed {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(%scope, %kind, error = %e, "Failed to list entries");
                return Vec::new();
            }
        };

        let excluded: Vec<&str> = exclusions
            .iter()
            .map(|k| self.settings.layout(*k).path.as_str())
            .collect();

        names
            .iter()
            .filter(|name| matches(name, &layout.suffix, &excluded))
            .map(|name| strip_suffix(name, &layout.suffix).to_string())
            .collect()
    }
}

/// Collapse a lookup into an optional value, logging failures.
fn found<T>(result: Result<Option<T>>, kind: EntityKind, scope: &str, key: &str) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e @ Error::Fs(salix_fs::Error::Parse { .. })) => {
            tracing::warn!(%scope, %key, %kind, error = %e, "Skipping unreadable entry");
            None
        }
        Err(e) => {
            tracing::error!(%scope, %key, %kind, error = %e, "Failed to read entry");
            None
        }
    }
}

fn require_key(kind: EntityKind, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::EmptyKey { kind });
    }
    Ok(())
}

impl SalixService for FsSalixService {
    type Resource = FsResource;
    type Error = Error;

    fn scopes(&self) -> BTreeSet<String> {
        let global_templates = self.settings.templates.path.as_str();
        match self.client.list_directories(&[""]) {
            Ok(dirs) => dirs
                .into_iter()
                .filter(|dir| dir != global_templates)
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list scopes");
                BTreeSet::new()
            }
        }
    }

    fn configurations_for(&self, target: &str) -> Vec<Configuration> {
        let layout = &self.settings.configurations;
        let wanted = target.to_lowercase();
        let mut configs = Vec::new();
        for scope in self.scopes() {
            let keys = self.listed_keys(
                EntityKind::Configuration,
                &scope,
                &[EntityKind::Template, EntityKind::Url],
            );
            for key in keys.iter().filter(|key| key.to_lowercase() == wanted) {
                if let Some(config) = self.configuration(&scope, key) {
                    configs.push(config);
                }
            }
        }
        tracing::debug!(%target, found = configs.len(), suffix = %layout.suffix, "Scanned scopes for configuration");
        configs
    }

    fn configuration(&self, scope: &str, target: &str) -> Option<Configuration> {
        found(
            self.lookup_configuration(scope, target),
            EntityKind::Configuration,
            scope,
            target,
        )
    }

    fn save_configuration(&self, scope: &str, target: &str, map: Attributes) -> Result<Configuration> {
        require_key(EntityKind::Configuration, target)?;
        let layout = &self.settings.configurations;
        let configuration = Configuration::new(scope, target, map);
        self.write_document(
            Format::Json,
            &[scope, &layout.path, &layout.file_name(target)],
            &configuration,
        )?;
        Ok(configuration)
    }

    fn url(&self, url: &str, scope: &str) -> Option<Url> {
        found(self.lookup_url(url, scope), EntityKind::Url, scope, url)
    }

    fn save_url(&self, url: Url) -> Result<Url> {
        let layout = &self.settings.urls;
        let key = canonical_url_key(&url.url);
        self.write_document(
            self.document_format(EntityKind::Url),
            &[&url.scope, &layout.path, &layout.file_name(&key)],
            &url,
        )?;
        Ok(url)
    }

    fn template(&self, name: &str, scope: Option<&str>) -> Option<Template> {
        found(
            self.lookup_template(name, scope),
            EntityKind::Template,
            scope.unwrap_or_default(),
            name,
        )
    }

    fn save_template(&self, scope: &str, name: &str, source: &str) -> Result<Template> {
        require_key(EntityKind::Template, name)?;
        let layout = &self.settings.templates;
        self.write_document(
            Format::Text,
            &[scope, &layout.path, &layout.file_name(name)],
            source,
        )?;
        Ok(Template::new(scope, name, source))
    }

    fn resource(&self, source_id: &str, scope: &str) -> FsResource {
        let layout = &self.settings.resources;
        FsResource::new(
            Arc::clone(&self.client),
            scope,
            &layout.path,
            source_id,
            layout.file_name(source_id),
        )
    }

    fn save_resource(
        &self,
        scope: &str,
        source_id: &str,
        source_uri: &str,
        map: &Attributes,
    ) -> Result<FsResource> {
        let rendered = serde_json::to_string(map).map_err(|e| salix_fs::Error::Serialize {
            path: source_id.into(),
            format: Format::Json.name().into(),
            message: e.to_string(),
        })?;
        self.save_resource_bytes(scope, source_id, source_uri, None, rendered.as_bytes())
    }

    fn save_resource_bytes(
        &self,
        scope: &str,
        source_id: &str,
        source_uri: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<FsResource> {
        require_key(EntityKind::Resource, source_id)?;
        let layout = &self.settings.resources;
        self.client
            .write_bytes(bytes, &[scope, &layout.path, &layout.file_name(source_id)])?;
        tracing::debug!(%scope, %source_id, %source_uri, ?content_type, bytes = bytes.len(), "Saved resource");
        Ok(self.resource(source_id, scope))
    }

    fn templates_in(&self, scope: &str) -> Vec<Template> {
        self.listed_keys(
            EntityKind::Template,
            scope,
            &[EntityKind::Configuration, EntityKind::Resource],
        )
        .iter()
        .filter_map(|name| self.template(name, Some(scope)))
        .collect()
    }

    fn resources_in(&self, scope: &str) -> Vec<FsResource> {
        self.listed_keys(
            EntityKind::Resource,
            scope,
            &[EntityKind::Template, EntityKind::Url],
        )
        .iter()
        .map(|source_id| self.resource(source_id, scope))
        .collect()
    }

    fn urls_in(&self, scope: &str) -> Vec<Url> {
        self.listed_keys(
            EntityKind::Url,
            scope,
            &[EntityKind::Configuration, EntityKind::Resource],
        )
        .iter()
        .filter_map(|key| self.url(key, scope))
        .collect()
    }

    fn configurations_in(&self, scope: &str) -> Vec<Configuration> {
        self.listed_keys(
            EntityKind::Configuration,
            scope,
            &[EntityKind::Url, EntityKind::Resource, EntityKind::Template],
        )
        .iter()
        .filter_map(|target| self.configuration(scope, target))
        .collect()
    }
}
