//! End-to-end scenarios: the controller wired to the real file-backed
//! storage adapter, with programmable gateway doubles.

use std::sync::Arc;
use std::time::Duration;

use app_lib::adapters::JsonFileStorage;
use app_lib::workflow::WorkflowController;
use async_trait::async_trait;
use bytes::Bytes;
use summarizer_core::domain::PdfFile;
use summarizer_core::ports::{PortError, PortResult, SummarizationService};

/// Gateway double with a fixed reply, optional failure and optional delay.
struct ScriptedGateway {
    reply: String,
    fail: bool,
    delay: Duration,
}

impl ScriptedGateway {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            delay: Duration::ZERO,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: true,
            delay: Duration::ZERO,
        })
    }

    fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            delay,
        })
    }
}

#[async_trait]
impl SummarizationService for ScriptedGateway {
    async fn summarize(&self, _file_name: &str, _data: &[u8]) -> PortResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(PortError::ProcessingFailed);
        }
        Ok(self.reply.clone())
    }
}

fn pdf_of_size(name: &str, size: usize) -> PdfFile {
    PdfFile::new(name, Bytes::from(vec![0x25u8; size]))
}

async fn controller_at(
    path: &std::path::Path,
    gateway: Arc<dyn SummarizationService>,
) -> WorkflowController {
    let controller = WorkflowController::new(gateway, Arc::new(JsonFileStorage::new(path)));
    controller.hydrate().await;
    controller
}

#[tokio::test]
async fn successful_submit_records_name_size_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let controller = controller_at(&path, ScriptedGateway::replying("X")).await;

    controller
        .select_file(Some(pdf_of_size("report.pdf", 2_000_000)))
        .await;
    controller.submit().await;

    let items = controller.history_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].pdf_name, "report.pdf");
    assert_eq!(items[0].pdf_size, 2_000_000);
    assert_eq!(items[0].summary, "X");
    assert_eq!(controller.state().await.current_summary, "X");
}

#[tokio::test]
async fn gateway_failure_surfaces_verbatim_and_leaves_history_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let controller = controller_at(&path, ScriptedGateway::failing()).await;

    controller.select_file(Some(pdf_of_size("report.pdf", 100))).await;
    controller.submit().await;

    let state = controller.state().await;
    assert_eq!(state.current_summary, "");
    assert_eq!(state.error_message.as_deref(), Some("Failed to process the PDF file"));
    assert!(controller.history_items().await.is_empty());
}

#[tokio::test]
async fn clear_survives_a_reload_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let controller = controller_at(&path, ScriptedGateway::replying("S")).await;
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            controller.select_file(Some(pdf_of_size(name, 10))).await;
            controller.submit().await;
        }
        assert_eq!(controller.history_items().await.len(), 3);
        controller.clear_all_history().await;
        assert!(controller.history_items().await.is_empty());
    }

    // A fresh process hydrating from the same key sees the cleared state.
    let reloaded = controller_at(&path, ScriptedGateway::replying("S")).await;
    assert!(reloaded.history_items().await.is_empty());
}

#[tokio::test]
async fn history_survives_a_reload_but_blob_references_dangle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let controller = controller_at(&path, ScriptedGateway::replying("stored summary")).await;
        controller.select_file(Some(pdf_of_size("report.pdf", 10))).await;
        controller.submit().await;
    }

    // Second session: the item is back, its transient reference is not.
    let controller = controller_at(&path, ScriptedGateway::replying("unused")).await;
    let items = controller.history_items().await;
    assert_eq!(items.len(), 1);
    assert!(items[0].pdf_url.is_some());

    controller.select_file(Some(pdf_of_size("current.pdf", 10))).await;
    controller.view_history_item(items[0].id).await;

    let state = controller.state().await;
    // Summary restores; the expired reference leaves the selection alone.
    assert_eq!(state.current_summary, "stored summary");
    assert_eq!(
        state.selected_file.map(|file| file.name),
        Some("current.pdf".to_string())
    );
    assert!(controller.original_file(items[0].id).await.is_none());
}

#[tokio::test]
async fn a_stale_result_is_still_applied_after_reselection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let gateway = ScriptedGateway::slow("slow summary", Duration::from_millis(50));
    let controller = Arc::new(controller_at(&path, gateway).await);

    controller.select_file(Some(pdf_of_size("first.pdf", 10))).await;
    let in_flight = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });

    // Reselect while the request is pending. No cancellation exists.
    tokio::time::sleep(Duration::from_millis(10)).await;
    controller.select_file(Some(pdf_of_size("second.pdf", 10))).await;
    assert!(controller.state().await.is_submitting);

    in_flight.await.unwrap();

    let state = controller.state().await;
    assert!(!state.is_submitting);
    // The superseded result lands anyway, and the history entry belongs to
    // the file that was actually submitted.
    assert_eq!(state.current_summary, "slow summary");
    let items = controller.history_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].pdf_name, "first.pdf");
}

#[tokio::test]
async fn submitting_while_in_flight_is_suppressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let gateway = ScriptedGateway::slow("only one", Duration::from_millis(50));
    let controller = Arc::new(controller_at(&path, gateway).await);

    controller.select_file(Some(pdf_of_size("report.pdf", 10))).await;
    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Re-entrant submit returns immediately without a second gateway call.
    controller.submit().await;
    first.await.unwrap();

    assert_eq!(controller.history_items().await.len(), 1);
}
