//! services/app/src/workflow.rs
//!
//! The workflow controller: the state machine behind the summarizer view.
//!
//! It owns the per-session view state (selected file, current summary, error,
//! in-flight flag, active view), wires the history store and the gateway
//! together, and implements the restore-from-history reconstruction. All
//! methods take `&self` so the presentation layer can keep issuing intents
//! while a submission is in flight; locks are only held across synchronous
//! sections, never across the gateway await.

use std::sync::Arc;

use summarizer_core::domain::{PdfFile, SummaryItem};
use summarizer_core::ports::{HistoryStorage, SummarizationService};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::history::SummaryHistory;

/// Error shown when submit is pressed without a selection.
const ERR_NO_FILE_SELECTED: &str = "Please upload a PDF file first";
/// Error shown when the selected file is not a PDF.
const ERR_NOT_A_PDF: &str = "Please upload a PDF file";

/// Which of the two top-level views the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Summarize,
    History,
}

/// The per-session view state. Never persisted.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub selected_file: Option<PdfFile>,
    pub current_summary: String,
    pub error_message: Option<String>,
    pub is_submitting: bool,
    pub active_view: ActiveView,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            selected_file: None,
            current_summary: String::new(),
            error_message: None,
            is_submitting: false,
            active_view: ActiveView::Summarize,
        }
    }
}

/// Orchestrates the summarize workflow over the gateway and history ports.
pub struct WorkflowController {
    state: Mutex<WorkflowState>,
    history: Mutex<SummaryHistory>,
    gateway: Arc<dyn SummarizationService>,
}

impl WorkflowController {
    /// Creates a new controller. Call `hydrate` before issuing intents so
    /// the history store has completed its initial load.
    pub fn new(gateway: Arc<dyn SummarizationService>, storage: Arc<dyn HistoryStorage>) -> Self {
        Self {
            state: Mutex::new(WorkflowState::default()),
            history: Mutex::new(SummaryHistory::new(storage)),
            gateway,
        }
    }

    /// Runs the history store's one-shot initial load.
    pub async fn hydrate(&self) {
        self.history.lock().await.hydrate().await;
    }

    /// Replaces the current selection. A new file (or a deselection)
    /// unconditionally invalidates the previous summary and error. A
    /// non-PDF selection is rejected with an inline error and leaves the
    /// previous selection untouched.
    pub async fn select_file(&self, file: Option<PdfFile>) {
        let mut state = self.state.lock().await;
        if let Some(candidate) = &file {
            if !candidate.is_pdf() {
                warn!(name = %candidate.name, "rejected non-PDF selection");
                state.error_message = Some(ERR_NOT_A_PDF.to_string());
                return;
            }
        }
        state.selected_file = file;
        state.current_summary.clear();
        state.error_message = None;
    }

    /// Submits the selected file to the gateway.
    ///
    /// Guarded: without a selection this sets an inline error and never
    /// invokes the gateway, and a submission already in flight suppresses
    /// re-entry. There is no cancellation: if the user reselects while the
    /// call is pending, the eventual result is still applied (stale display
    /// is cosmetic, the history entry is correct for the submitted file).
    pub async fn submit(&self) {
        let file = {
            let mut state = self.state.lock().await;
            if state.is_submitting {
                return;
            }
            let Some(file) = state.selected_file.clone() else {
                state.error_message = Some(ERR_NO_FILE_SELECTED.to_string());
                return;
            };
            state.is_submitting = true;
            state.error_message = None;
            file
        };

        // The only suspension point of the workflow. No locks are held here.
        let result = self.gateway.summarize(&file.name, &file.data).await;

        match result {
            Ok(summary) => {
                let item = self.history.lock().await.add(&file, &summary).await;
                info!(id = %item.id, name = %file.name, "summary recorded");

                let mut state = self.state.lock().await;
                state.current_summary = summary;
                state.is_submitting = false;
            }
            Err(err) => {
                warn!(name = %file.name, error = %err, "summarization failed");
                let mut state = self.state.lock().await;
                state.error_message = Some(err.to_string());
                state.is_submitting = false;
            }
        }
    }

    /// Loads a history item back into the summarize view.
    ///
    /// The stored summary always transfers. The original file transfers only
    /// if its transient blob reference is still live; an expired reference
    /// is logged and leaves the current selection unchanged (the summary
    /// still displays, file-dependent actions stay unavailable).
    pub async fn view_history_item(&self, id: Uuid) {
        let (summary, reconstructed) = {
            let history = self.history.lock().await;
            let Some(item) = history.find(id) else {
                return;
            };
            let reconstructed = match item.pdf_url.as_deref() {
                Some(url) => match history.resolve_blob(url) {
                    Some(data) => Some(PdfFile::new(item.pdf_name.clone(), data)),
                    None => {
                        warn!(id = %id, "transient file reference expired, keeping current selection");
                        None
                    }
                },
                None => None,
            };
            (item.summary.clone(), reconstructed)
        };

        let mut state = self.state.lock().await;
        state.current_summary = summary;
        if let Some(file) = reconstructed {
            state.selected_file = Some(file);
        }
        state.active_view = ActiveView::Summarize;
    }

    /// Deletes one history item. The current selection and summary stay as
    /// they are.
    pub async fn remove_history_item(&self, id: Uuid) {
        self.history.lock().await.remove(id).await;
    }

    /// Deletes the whole history. The current selection and summary stay as
    /// they are.
    pub async fn clear_all_history(&self) {
        self.history.lock().await.clear().await;
    }

    pub async fn switch_view(&self, view: ActiveView) {
        self.state.lock().await.active_view = view;
    }

    /// Snapshot of the view state for rendering.
    pub async fn state(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    /// Snapshot of the history items, newest first, for rendering.
    pub async fn history_items(&self) -> Vec<SummaryItem> {
        self.history.lock().await.items().to_vec()
    }

    /// Resolves a history item's original bytes if its transient reference
    /// is still live. Backs the save-a-copy action in the history view.
    pub async fn original_file(&self, id: Uuid) -> Option<PdfFile> {
        let history = self.history.lock().await;
        let item = history.find(id)?;
        let url = item.pdf_url.as_deref()?;
        let data = history.resolve_blob(url)?;
        Some(PdfFile::new(item.pdf_name.clone(), data))
    }
}
