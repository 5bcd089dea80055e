//! services/app/src/bin/app.rs

use app_lib::{
    adapters::{JsonFileStorage, MockSummarizer},
    config::Config,
    error::AppError,
    ui::{self, Intent},
    workflow::{ActiveView, WorkflowController},
};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use summarizer_core::domain::PdfFile;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(history = %config.history_path.display(), "configuration loaded");

    // --- 2. Initialize Adapters & Controller ---
    let storage = Arc::new(JsonFileStorage::new(config.history_path.clone()));
    let gateway = Arc::new(MockSummarizer::new(config.summarize_delay));
    let controller = Arc::new(WorkflowController::new(gateway, storage));
    controller.hydrate().await;

    // --- 3. Run the Intent Loop ---
    println!("pdf summarizer (type 'help' for commands)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(intent) = ui::parse_intent(&line) else {
            if !line.trim().is_empty() {
                println!("unrecognized command, type 'help'");
            }
            continue;
        };

        match intent {
            Intent::SelectFile(path) => match tokio::fs::read(&path).await {
                Ok(data) => {
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    controller
                        .select_file(Some(PdfFile::new(name, Bytes::from(data))))
                        .await;
                }
                Err(err) => println!("cannot read {}: {err}", path.display()),
            },
            Intent::Deselect => controller.select_file(None).await,
            Intent::Submit => controller.submit().await,
            Intent::SwitchView(view) => controller.switch_view(view).await,
            Intent::ViewHistoryItem(position) => {
                if let Some(id) = item_id_at(&controller, position).await {
                    controller.view_history_item(id).await;
                }
            }
            Intent::RemoveHistoryItem(position) => {
                if let Some(id) = item_id_at(&controller, position).await {
                    controller.remove_history_item(id).await;
                }
            }
            Intent::ClearAllHistory => controller.clear_all_history().await,
            Intent::SaveOriginal(position, target) => {
                let file = match item_id_at(&controller, position).await {
                    Some(id) => controller.original_file(id).await,
                    None => None,
                };
                match file {
                    Some(file) => {
                        tokio::fs::write(&target, &file.data).await?;
                        println!("saved {} to {}", file.name, target.display());
                    }
                    None => println!("original PDF is no longer available for that item"),
                }
            }
            Intent::Help => {
                println!("{}", ui::HELP);
                continue;
            }
            Intent::Quit => break,
        }

        // state -> view, one direction
        let state = controller.state().await;
        match state.active_view {
            ActiveView::Summarize => print!("{}", ui::render_summarize(&state)),
            ActiveView::History => {
                let items = controller.history_items().await;
                print!("{}", ui::render_history(&items, Utc::now()));
            }
        }
    }

    Ok(())
}

/// Maps a 1-based position in the rendered history to an item id.
async fn item_id_at(controller: &WorkflowController, position: usize) -> Option<uuid::Uuid> {
    let items = controller.history_items().await;
    let item = position.checked_sub(1).and_then(|index| items.get(index));
    if item.is_none() {
        println!("no history item at position {position}");
    }
    item.map(|item| item.id)
}
