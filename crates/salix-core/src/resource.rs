//! Opaque resource handles

use std::io::Write;

/// Coarse classification of a resource payload, inferred from its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Text,
    Json,
    Binary,
}

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "css"];
const JSON_EXTENSIONS: [&str; 2] = ["json", "yml"];

impl ResourceType {
    /// Infer the type from the key's extension only; content is never
    /// inspected.
    pub fn from_key(key: &str) -> Self {
        let Some((_, extension)) = key.rsplit_once('.') else {
            return Self::Binary;
        };
        if TEXT_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
            Self::Text
        } else if JSON_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
            Self::Json
        } else {
            Self::Binary
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Binary => "binary",
        }
    }
}

/// A sink that resource content can be copied into.
pub trait ResourceWriter {
    fn output_stream(&mut self) -> &mut dyn Write;
}

impl<W: Write> ResourceWriter for W {
    fn output_stream(&mut self) -> &mut dyn Write {
        self
    }
}

/// Handle to a stored resource.
///
/// Handles are cheap to create; existence and content are resolved against
/// the backing store each time they are asked for.
pub trait SalixResource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn scope(&self) -> &str;

    fn source_id(&self) -> &str;

    /// Location of the payload within the backing store.
    fn source_uri(&self) -> String;

    fn resource_id(&self) -> &str {
        self.source_id()
    }

    /// Public URI the hosting application serves the resource under.
    fn resource_uri(&self) -> String {
        format!("/salix/resource/{}", self.resource_id())
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::from_key(self.resource_id())
    }

    fn content_type(&self) -> Option<&str> {
        None
    }

    fn exists(&self) -> bool;

    /// Copy the payload into `writer`, returning the number of bytes copied.
    fn write_to(&self, writer: &mut dyn ResourceWriter) -> Result<u64, Self::Error>;
}
