pub mod adapters;
pub mod blobs;
pub mod config;
pub mod error;
pub mod history;
pub mod ui;
pub mod workflow;

pub use config::Config;
pub use error::AppError;
pub use workflow::{ActiveView, WorkflowController, WorkflowState};
