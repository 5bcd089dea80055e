//! services/app/src/blobs.rs
//!
//! An explicit resource table for transient file bytes.
//!
//! Each entry maps a `blob:<uuid>` url to the original file's bytes, mirroring
//! the object-url scheme the durable records carry. Entries live for the
//! current process only: urls read back from durable storage after a restart
//! are expected to dangle, and `resolve` simply returns `None` for them.

use std::collections::HashMap;

use bytes::Bytes;
use uuid::Uuid;

/// In-memory table of transient file references, owned by the history store.
///
/// Entries must be released when their owning item is removed or the history
/// is cleared, so a long session does not accumulate file payloads.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    blobs: HashMap<String, Bytes>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the given bytes and mints a fresh `blob:` url for them.
    pub fn create(&mut self, data: Bytes) -> String {
        let url = format!("blob:{}", Uuid::new_v4());
        self.blobs.insert(url.clone(), data);
        url
    }

    /// Looks up a url. `None` means the reference has expired (or belongs
    /// to a previous process), which callers treat as degradation, not error.
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        self.blobs.get(url).cloned()
    }

    /// Drops the entry for the given url, if present.
    pub fn release(&mut self, url: &str) {
        self.blobs.remove(url);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.blobs.clear();
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_urls_resolve_to_the_stored_bytes() {
        let mut registry = BlobRegistry::new();
        let url = registry.create(Bytes::from_static(b"%PDF-1.4"));

        assert!(url.starts_with("blob:"));
        assert_eq!(registry.resolve(&url), Some(Bytes::from_static(b"%PDF-1.4")));
    }

    #[test]
    fn urls_are_unique_per_entry() {
        let mut registry = BlobRegistry::new();
        let a = registry.create(Bytes::from_static(b"a"));
        let b = registry.create(Bytes::from_static(b"a"));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn released_and_foreign_urls_do_not_resolve() {
        let mut registry = BlobRegistry::new();
        let url = registry.create(Bytes::from_static(b"a"));
        registry.release(&url);

        assert_eq!(registry.resolve(&url), None);
        // A url persisted by a previous process dangles the same way.
        assert_eq!(registry.resolve("blob:cc5f1e72-0000-0000-0000-000000000000"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_empties_the_table() {
        let mut registry = BlobRegistry::new();
        registry.create(Bytes::from_static(b"a"));
        registry.create(Bytes::from_static(b"b"));
        registry.clear();
        assert!(registry.is_empty());
    }
}
