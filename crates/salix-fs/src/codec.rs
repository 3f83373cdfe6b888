//! Format-agnostic encoding and decoding of stored documents

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Serialization format of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    /// Raw UTF-8 text, only usable with `String` payloads
    Text,
}

impl Format {
    /// Detect a format from a file extension (without the dot).
    ///
    /// - `json` -> JSON
    /// - `yaml`, `yml` -> YAML
    /// - `toml` -> TOML
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "txt" | "html" | "htm" => Ok(Self::Text),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Detect a format from a file name or a bare suffix such as `.yml`.
    pub fn from_file_name(name: &str) -> Result<Self> {
        match name.rfind('.') {
            Some(idx) => Self::from_extension(&name[idx + 1..]),
            None => Err(Error::UnsupportedFormat {
                extension: String::new(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Text => "text",
        }
    }

    /// Decode `content` read from `path`. The path is only used for errors.
    pub fn decode<T: DeserializeOwned>(&self, path: &Path, content: &[u8]) -> Result<T> {
        let parse_error = |message: String| Error::Parse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        };
        match self {
            Self::Json => serde_json::from_slice(content).map_err(|e| parse_error(e.to_string())),
            Self::Yaml => serde_yaml::from_slice(content).map_err(|e| parse_error(e.to_string())),
            Self::Toml => {
                let text = std::str::from_utf8(content).map_err(|e| parse_error(e.to_string()))?;
                toml::from_str(text).map_err(|e| parse_error(e.to_string()))
            }
            Self::Text => {
                let text = std::str::from_utf8(content).map_err(|e| parse_error(e.to_string()))?;
                T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(
                    text,
                ))
                .map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Encode `value` destined for `path`. The path is only used for errors.
    ///
    /// JSON and TOML are pretty-printed.
    pub fn encode<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<Vec<u8>> {
        let serialize_error = |message: String| Error::Serialize {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        };
        match self {
            Self::Json => {
                serde_json::to_vec_pretty(value).map_err(|e| serialize_error(e.to_string()))
            }
            Self::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| serialize_error(e.to_string())),
            Self::Toml => toml::to_string_pretty(value)
                .map(String::into_bytes)
                .map_err(|e| serialize_error(e.to_string())),
            Self::Text => match serde_json::to_value(value) {
                Ok(serde_json::Value::String(text)) => Ok(text.into_bytes()),
                Ok(other) => Err(serialize_error(format!(
                    "text format needs a string, got {other}"
                ))),
                Err(e) => Err(serialize_error(e.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn detects_from_suffix() {
        assert_eq!(Format::from_file_name(".yml").unwrap(), Format::Yaml);
        assert_eq!(Format::from_file_name("home.json").unwrap(), Format::Json);
        assert_eq!(Format::from_file_name("salix.toml").unwrap(), Format::Toml);
        assert!(Format::from_file_name("noext").is_err());
    }

    #[test]
    fn text_round_trips_strings() {
        let path = Path::new("page.html");
        let bytes = Format::Text.encode(path, "<h1>Hi</h1>").unwrap();
        assert_eq!(bytes, b"<h1>Hi</h1>");
        let decoded: String = Format::Text.decode(path, &bytes).unwrap();
        assert_eq!(decoded, "<h1>Hi</h1>");
    }

    #[test]
    fn text_rejects_structured_values() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        assert!(Format::Text.encode(Path::new("x.txt"), &map).is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result: Result<BTreeMap<String, i32>> =
            Format::Json.decode(Path::new("broken.json"), b"{not json");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
