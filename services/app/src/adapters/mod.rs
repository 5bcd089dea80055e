pub mod storage;
pub mod summarizer;

pub use storage::JsonFileStorage;
pub use summarizer::MockSummarizer;
