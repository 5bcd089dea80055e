//! crates/summarizer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like storage backends
//! or summarization engines.

use async_trait::async_trait;

use crate::domain::SummaryItem;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The `Display` strings of `MissingInput` and `ProcessingFailed` are shown
/// to the user verbatim, so keep them in user language.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("No PDF file provided")]
    MissingInput,
    #[error("Failed to process the PDF file")]
    ProcessingFailed,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The summarization gateway: one asynchronous, single-shot call with
/// unspecified but bounded latency. No retries. The result is a tagged
/// union, never summary text and an error at the same time.
#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Produces summary text for the given file bytes.
    async fn summarize(&self, file_name: &str, data: &[u8]) -> PortResult<String>;
}

/// Durable storage for the summary history: a single key holding the
/// whole serialized state.
///
/// Injected rather than ambient so tests can substitute an in-memory fake.
#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Reads the full history. A missing key yields an empty list, and
    /// malformed contents fail soft to empty; only genuine IO faults are
    /// reported as errors.
    async fn load(&self) -> PortResult<Vec<SummaryItem>>;

    /// Serializes and writes the full history, overwriting prior contents.
    async fn save(&self, items: &[SummaryItem]) -> PortResult<()>;
}
