//! Local previews
//!
//! A preview is a `blob:` style URL pointing at bytes held by the registry.
//! The URL stays resolvable until its [`PreviewHandle`] is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use uuid::Uuid;

use super::file::SelectedFile;

const URL_PREFIX: &str = "blob:glyphdrop/";

#[derive(Debug, Clone)]
struct PreviewEntry {
    mime_type: String,
    bytes: Bytes,
}

/// Issues and resolves preview URLs
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<Mutex<HashMap<Uuid, PreviewEntry>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preview for the file
    pub fn create(&self, file: &SelectedFile) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.entries.lock().insert(
            id,
            PreviewEntry {
                mime_type: file.mime_type.clone(),
                bytes: file.bytes.clone(),
            },
        );
        tracing::trace!(%id, file_name = %file.name, "Preview created");

        PreviewHandle {
            id,
            url: format!("{}{}", URL_PREFIX, id),
            registry: self.clone(),
        }
    }

    /// Look up the MIME type and bytes behind a live preview URL
    pub fn resolve(&self, url: &str) -> Option<(String, Bytes)> {
        let id = url.strip_prefix(URL_PREFIX)?.parse::<Uuid>().ok()?;
        self.entries
            .lock()
            .get(&id)
            .map(|entry| (entry.mime_type.clone(), entry.bytes.clone()))
    }

    /// Number of previews not yet released
    pub fn outstanding(&self) -> usize {
        self.entries.lock().len()
    }

    fn revoke(&self, id: Uuid) {
        if self.entries.lock().remove(&id).is_some() {
            tracing::trace!(%id, "Preview revoked");
        }
    }
}

/// Owner of a preview URL; revokes it on drop
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}

impl std::fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("outstanding", &self.outstanding())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> SelectedFile {
        SelectedFile::new("a.png", "image/png", b"png-bytes".to_vec())
    }

    #[test]
    fn test_create_and_resolve() {
        let registry = PreviewRegistry::new();
        let handle = registry.create(&file());

        assert!(handle.url().starts_with("blob:glyphdrop/"));
        let (mime, bytes) = registry.resolve(handle.url()).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(&bytes[..], b"png-bytes");
        assert_eq!(registry.outstanding(), 1);
    }

    #[test]
    fn test_drop_revokes() {
        let registry = PreviewRegistry::new();
        let handle = registry.create(&file());
        let url = handle.url().to_string();

        drop(handle);

        assert!(registry.resolve(&url).is_none());
        assert_eq!(registry.outstanding(), 0);
    }

    #[test]
    fn test_resolve_rejects_foreign_urls() {
        let registry = PreviewRegistry::new();
        let _handle = registry.create(&file());

        assert!(registry.resolve("blob:elsewhere/123").is_none());
        assert!(registry.resolve("blob:glyphdrop/not-a-uuid").is_none());
    }
}
