//! Lazy resource handles

use std::io;
use std::sync::Arc;

use salix_core::{ResourceWriter, SalixResource};
use salix_fs::FsClient;

use crate::{Error, Result};

/// Handle to a resource payload in the byte store.
///
/// Creating a handle performs no I/O. Every call to [`exists`],
/// [`write_to`] or [`FsResource::read_bytes`] goes back to the store.
///
/// [`exists`]: SalixResource::exists
/// [`write_to`]: SalixResource::write_to
#[derive(Debug, Clone)]
pub struct FsResource {
    scope: String,
    source_id: String,
    folder: String,
    file_name: String,
    client: Arc<dyn FsClient>,
}

impl FsResource {
    pub(crate) fn new(
        client: Arc<dyn FsClient>,
        scope: &str,
        folder: &str,
        source_id: &str,
        file_name: String,
    ) -> Self {
        Self {
            scope: scope.to_string(),
            source_id: source_id.to_string(),
            folder: folder.to_string(),
            file_name,
            client,
        }
    }

    fn segments(&self) -> [&str; 3] {
        [self.scope.as_str(), self.folder.as_str(), self.file_name.as_str()]
    }

    /// Read the whole payload, `Ok(None)` when nothing is stored.
    pub fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.client.read_bytes(&self.segments())?)
    }
}

impl PartialEq for FsResource {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.source_id == other.source_id
            && self.folder == other.folder
            && self.file_name == other.file_name
    }
}

impl SalixResource for FsResource {
    type Error = Error;

    fn scope(&self) -> &str {
        &self.scope
    }

    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_uri(&self) -> String {
        format!("{}/{}/{}", self.scope, self.folder, self.source_id)
    }

    /// True when a readable payload is stored. A folder under the key does
    /// not count.
    fn exists(&self) -> bool {
        self.client
            .read(&self.segments())
            .is_ok_and(|reader| reader.is_some())
    }

    fn write_to(&self, writer: &mut dyn ResourceWriter) -> Result<u64> {
        let Some(mut reader) = self.client.read(&self.segments())? else {
            return Err(Error::ResourceNotFound {
                scope: self.scope.clone(),
                source_id: self.source_id.clone(),
            });
        };
        let copied = io::copy(&mut reader, writer.output_stream())
            .map_err(|e| salix_fs::Error::io(self.source_uri(), e))?;
        tracing::debug!(scope = %self.scope, source_id = %self.source_id, bytes = copied, "Copied resource");
        Ok(copied)
    }
}
