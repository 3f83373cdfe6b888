//! Entity kinds and the file-naming rules that go with them

use salix_fs::Format;

use crate::KindLayout;

/// The four kinds of content a scope holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Url,
    Template,
    Configuration,
    Resource,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Url,
        EntityKind::Template,
        EntityKind::Configuration,
        EntityKind::Resource,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Template => "template",
            Self::Configuration => "configuration",
            Self::Resource => "resource",
        }
    }

    /// Document format for stored entities of this kind.
    ///
    /// URLs follow their configured suffix (JSON when it ends in `json`,
    /// YAML otherwise). Resources are raw bytes and have no format.
    pub fn format(&self, layout: &KindLayout) -> Option<Format> {
        match self {
            Self::Url if layout.suffix.ends_with("json") => Some(Format::Json),
            Self::Url => Some(Format::Yaml),
            Self::Template => Some(Format::Text),
            Self::Configuration => Some(Format::Json),
            Self::Resource => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" | "urls" => Ok(Self::Url),
            "template" | "templates" => Ok(Self::Template),
            "configuration" | "configurations" | "config" => Ok(Self::Configuration),
            "resource" | "resources" => Ok(Self::Resource),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

/// Map a URL path to its logical key.
///
/// The empty URL and URLs ending in `/` address a folder index, stored under
/// `index`: `""` becomes `index`, `"blog/"` becomes `blog/index`. A leading
/// `/` is dropped.
pub fn canonical_url_key(url: &str) -> String {
    let mut key = if url.is_empty() { "/".to_string() } else { url.to_string() };
    if key.ends_with('/') {
        key.push_str("index");
    }
    key.trim_start_matches('/').to_string()
}

/// Decide whether a listed file name belongs to a listing.
///
/// A name is accepted when it starts with one of the non-empty `exclusions`
/// (the folder names of other kinds), or when it ends with `suffix`. An
/// empty suffix accepts everything.
pub fn matches(name: &str, suffix: &str, exclusions: &[&str]) -> bool {
    if exclusions
        .iter()
        .any(|exclusion| !exclusion.trim().is_empty() && name.starts_with(exclusion))
    {
        return true;
    }
    suffix.trim().is_empty() || name.ends_with(suffix)
}

/// Drop `suffix` from a listed file name to recover the logical key.
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    name.strip_suffix(suffix).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "index")]
    #[case("/", "index")]
    #[case("a/", "a/index")]
    #[case("/blog/2024/", "blog/2024/index")]
    #[case("about", "about")]
    #[case("/about", "about")]
    fn url_keys_are_canonical(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(canonical_url_key(url), expected);
    }

    #[rstest]
    #[case("home.json", ".json", &[], true)]
    #[case("home.yml", ".json", &[], false)]
    #[case("anything", "", &[], true)]
    #[case("templates-old", ".json", &["templates", "urls"], true)]
    #[case("notes.txt", ".json", &["", "urls"], false)]
    fn matching_follows_suffix_or_exclusion(
        #[case] name: &str,
        #[case] suffix: &str,
        #[case] exclusions: &[&str],
        #[case] expected: bool,
    ) {
        assert_eq!(matches(name, suffix, exclusions), expected);
    }

    #[test]
    fn strip_is_safe_for_unsuffixed_names() {
        assert_eq!(strip_suffix("home.json", ".json"), "home");
        assert_eq!(strip_suffix("urls-legacy", ".json"), "urls-legacy");
        assert_eq!(strip_suffix("logo.png", ""), "logo.png");
    }

    #[test]
    fn url_format_follows_suffix() {
        let yaml = KindLayout::new("urls", ".yml");
        let json = KindLayout::new("urls", ".json");
        assert_eq!(EntityKind::Url.format(&yaml), Some(Format::Yaml));
        assert_eq!(EntityKind::Url.format(&json), Some(Format::Json));
        assert_eq!(EntityKind::Resource.format(&yaml), None);
    }

    #[test]
    fn kinds_parse_from_folder_names() {
        assert_eq!("urls".parse::<EntityKind>(), Ok(EntityKind::Url));
        assert_eq!("Configurations".parse::<EntityKind>(), Ok(EntityKind::Configuration));
        assert!("widgets".parse::<EntityKind>().is_err());
    }
}
