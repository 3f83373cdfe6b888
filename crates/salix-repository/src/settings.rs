//! Store settings
//!
//! Settings can be built in code with [`FsSettings::with_root`] or loaded
//! from a TOML, JSON or YAML file:
//!
//! ```toml
//! root = "/srv/salix"
//!
//! [urls]
//! suffix = ".json"
//!
//! [robustness]
//! lock_timeout_ms = 2000
//! enable_fsync = false
//! ```
//!
//! Every key is optional. A relative `root` is resolved against the
//! directory holding the settings file.

use std::path::{Path, PathBuf};

use salix_fs::{Format, RobustnessConfig};
use serde::{Deserialize, Serialize};

use crate::{EntityKind, Error, Result};

/// Folder name and file suffix used for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindLayout {
    pub path: String,
    pub suffix: String,
}

impl KindLayout {
    pub fn new(path: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            suffix: suffix.into(),
        }
    }

    /// File name for a logical key.
    pub fn file_name(&self, key: &str) -> String {
        format!("{key}{}", self.suffix)
    }

    fn apply(&mut self, layout: &LayoutOverride) {
        if let Some(path) = &layout.path {
            self.path = path.clone();
        }
        if let Some(suffix) = &layout.suffix {
            self.suffix = suffix.clone();
        }
    }
}

/// Settings for a filesystem-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsSettings {
    pub root: PathBuf,
    pub urls: KindLayout,
    pub templates: KindLayout,
    pub configurations: KindLayout,
    pub resources: KindLayout,
    pub robustness: RobustnessConfig,
}

impl Default for FsSettings {
    fn default() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("salix");
        Self::with_root(root)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LayoutOverride {
    path: Option<String>,
    suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    root: Option<PathBuf>,
    urls: LayoutOverride,
    templates: LayoutOverride,
    configurations: LayoutOverride,
    resources: LayoutOverride,
    robustness: Option<RobustnessConfig>,
}

impl FsSettings {
    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            urls: KindLayout::new("urls", ".yml"),
            templates: KindLayout::new("templates", ".html"),
            configurations: KindLayout::new("configurations", ".json"),
            resources: KindLayout::new("resources", ""),
            robustness: RobustnessConfig::default(),
        }
    }

    /// Load settings from a file; the format follows the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = Format::from_file_name(&name)?;
        let content = salix_fs::io::read_bytes(path)?.ok_or_else(|| Error::Settings {
            path: path.to_path_buf(),
            message: "file not found".into(),
        })?;
        let file: SettingsFile = format.decode(path, &content)?;

        let mut settings = Self::default();
        if let Some(root) = file.root {
            settings.root = match path.parent() {
                Some(dir) if root.is_relative() => dir.join(root),
                _ => root,
            };
        }
        settings.urls.apply(&file.urls);
        settings.templates.apply(&file.templates);
        settings.configurations.apply(&file.configurations);
        settings.resources.apply(&file.resources);
        if let Some(robustness) = file.robustness {
            settings.robustness = robustness;
        }

        tracing::debug!(?path, root = ?settings.root, "Loaded store settings");
        Ok(settings)
    }

    pub fn layout(&self, kind: EntityKind) -> &KindLayout {
        match kind {
            EntityKind::Url => &self.urls,
            EntityKind::Template => &self.templates,
            EntityKind::Configuration => &self.configurations,
            EntityKind::Resource => &self.resources,
        }
    }

    pub fn layout_mut(&mut self, kind: EntityKind) -> &mut KindLayout {
        match kind {
            EntityKind::Url => &mut self.urls,
            EntityKind::Template => &mut self.templates,
            EntityKind::Configuration => &mut self.configurations,
            EntityKind::Resource => &mut self.resources,
        }
    }
}
