pub mod domain;
pub mod ports;

pub use domain::{HistoryState, PdfFile, SummaryItem};
pub use ports::{HistoryStorage, PortError, PortResult, SummarizationService};
