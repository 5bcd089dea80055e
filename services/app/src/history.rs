//! services/app/src/history.rs
//!
//! The persisted history store: the in-memory list of past summaries, the
//! injected durable storage behind it, and the transient blob registry that
//! owns the original file bytes for the current session.
//!
//! Storage is a side channel here, never the source of truth: every mutation
//! applies in memory first and then re-persists, and a failed write only
//! costs durability for the session, never the mutation itself.

use std::sync::Arc;

use chrono::Utc;
use summarizer_core::domain::{HistoryState, PdfFile, SummaryItem};
use summarizer_core::ports::HistoryStorage;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::blobs::BlobRegistry;

/// The durable list of past summaries plus its session-scoped resources.
pub struct SummaryHistory {
    state: HistoryState,
    storage: Arc<dyn HistoryStorage>,
    blobs: BlobRegistry,
    loaded: bool,
}

impl SummaryHistory {
    /// Creates an empty, not-yet-hydrated store. Nothing is persisted until
    /// `hydrate` has run, so a startup race can never overwrite durable data
    /// with this empty default.
    pub fn new(storage: Arc<dyn HistoryStorage>) -> Self {
        Self {
            state: HistoryState::default(),
            storage,
            blobs: BlobRegistry::new(),
            loaded: false,
        }
    }

    /// Performs the one-shot initial load from durable storage.
    ///
    /// A load failure degrades to an empty history; it is logged and never
    /// propagated, because a broken history file must not block the session.
    pub async fn hydrate(&mut self) {
        match self.storage.load().await {
            Ok(items) => self.state = HistoryState::new(items),
            Err(err) => {
                warn!(error = %err, "failed to load summary history, starting empty");
                self.state = HistoryState::default();
            }
        }
        self.loaded = true;
    }

    pub fn items(&self) -> &[SummaryItem] {
        self.state.items()
    }

    pub fn find(&self, id: Uuid) -> Option<&SummaryItem> {
        self.state.find(id)
    }

    /// Resolves an item's transient blob url to the original file bytes.
    /// `None` means the reference expired (for instance across a restart).
    pub fn resolve_blob(&self, url: &str) -> Option<bytes::Bytes> {
        self.blobs.resolve(url)
    }

    /// Records a completed summarization: mints a fresh id, captures the
    /// current time, parks the file bytes in the blob registry, prepends the
    /// item and re-persists. Returns the new item.
    pub async fn add(&mut self, file: &PdfFile, summary: &str) -> SummaryItem {
        let pdf_url = self.blobs.create(file.data.clone());
        let item = SummaryItem {
            id: Uuid::new_v4(),
            pdf_name: file.name.clone(),
            pdf_size: file.size(),
            summary: summary.to_string(),
            timestamp: Utc::now(),
            pdf_url: Some(pdf_url),
        };

        self.state.prepend(item.clone());
        self.persist().await;
        item
    }

    /// Removes the item with the given id, releasing its blob. An absent id
    /// is a no-op and does not touch storage.
    pub async fn remove(&mut self, id: Uuid) {
        let Some(removed) = self.state.remove(id) else {
            return;
        };
        if let Some(url) = removed.pdf_url.as_deref() {
            self.blobs.release(url);
        }
        self.persist().await;
    }

    /// Clears the history and every transient blob, then re-persists the
    /// empty state.
    pub async fn clear(&mut self) {
        self.state.clear();
        self.blobs.clear();
        self.persist().await;
    }

    #[cfg(test)]
    pub(crate) fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    async fn persist(&self) {
        // Hydration ordering rule: never write before the initial load has
        // completed.
        if !self.loaded {
            debug!("skipping persist before hydration");
            return;
        }
        if let Err(err) = self.storage.save(self.state.items()).await {
            // The in-memory state stays authoritative for this session.
            warn!(error = %err, "failed to persist summary history");
        }
    }
}
