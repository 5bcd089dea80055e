//! crates/summarizer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry no IO; the history invariants (newest-first order,
//! unique ids, no in-place mutation) live here so they can be tested
//! without touching storage.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed summarization result, as persisted in durable storage.
///
/// Items are created whole and never mutated afterwards. The serialized
/// field names are the durable format, so renames here are breaking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub id: Uuid,
    pub pdf_name: String,
    pub pdf_size: u64,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    /// Transient blob url for the original file bytes. Valid only for the
    /// current process; after a restart it dangles and callers must degrade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

/// The ordered history of past summaries, newest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    items: Vec<SummaryItem>,
}

impl HistoryState {
    pub fn new(items: Vec<SummaryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[SummaryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: Uuid) -> Option<&SummaryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Inserts a new item at the front. Newest-first order is part of the
    /// contract, not incidental.
    pub fn prepend(&mut self, item: SummaryItem) {
        self.items.insert(0, item);
    }

    /// Removes the item with the given id, returning it so the caller can
    /// release any resources it owns. An absent id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<SummaryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Resets the history to empty, returning the drained items.
    pub fn clear(&mut self) -> Vec<SummaryItem> {
        std::mem::take(&mut self.items)
    }
}

/// A file the user has selected for summarization.
///
/// `Bytes` keeps clones cheap: the controller snapshots the selection
/// before awaiting the gateway, and the blob registry holds another
/// reference for the item's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFile {
    pub name: String,
    pub data: Bytes,
}

impl PdfFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the file looks like a PDF by name. The controller rejects
    /// anything else before the gateway is ever invoked.
    pub fn is_pdf(&self) -> bool {
        self.name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
    }
}
