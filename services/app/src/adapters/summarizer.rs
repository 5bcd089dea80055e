//! services/app/src/adapters/summarizer.rs
//!
//! This module contains the mock summarization adapter. It implements the
//! `SummarizationService` port from the `core` crate by fabricating a
//! plausible markdown summary after a simulated processing delay.
//!
//! A real implementation (document parsing plus model inference) would slot
//! in behind the same port without touching the workflow controller.

use std::time::Duration;

use async_trait::async_trait;
use summarizer_core::ports::{PortError, PortResult, SummarizationService};
use uuid::Uuid;

/// The topics the mock rotates through so repeated runs produce visibly
/// different summaries in the history.
const TOPICS: [&str; 5] = [
    "artificial intelligence and machine learning",
    "blockchain technology and cryptocurrencies",
    "climate change and sustainability",
    "remote work and digital transformation",
    "healthcare innovation and telemedicine",
];

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SummarizationService` port with fabricated
/// content.
#[derive(Clone)]
pub struct MockSummarizer {
    delay: Duration,
}

impl MockSummarizer {
    /// Creates a new `MockSummarizer` with the given simulated latency.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn render(file_name: &str, topic: &str, pages: u64) -> String {
        let lead = topic.split_whitespace().next().unwrap_or(topic);
        format!(
            r#"# Summary of "{file_name}" ({pages} pages)

## Overview
This document provides a comprehensive analysis of {topic} and its implications for various industries. The author presents a well-researched perspective on current trends and future developments.

## Key Points

1. **Current State of {lead} Technology**
   The document begins with an assessment of where {topic} stands today, highlighting recent breakthroughs and adoption rates across different sectors. Several case studies demonstrate successful implementation strategies.

2. **Challenges and Limitations**
   The author acknowledges several obstacles to wider adoption, including technical limitations, regulatory concerns, and organizational resistance to change. The document provides a balanced view of both opportunities and challenges.

3. **Future Outlook**
   The final section offers predictions for how {topic} will evolve over the next 5-10 years, with specific attention to emerging use cases and potential disruptions to traditional business models.

## Conclusion
The document concludes that organizations should develop strategic approaches to {topic} with a focus on long-term value creation rather than short-term gains. It emphasizes the importance of ethical considerations and responsible implementation."#
        )
    }
}

//=========================================================================================
// `SummarizationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SummarizationService for MockSummarizer {
    /// Fabricates summary text for the given file after the configured delay.
    async fn summarize(&self, file_name: &str, data: &[u8]) -> PortResult<String> {
        if file_name.is_empty() || data.is_empty() {
            return Err(PortError::MissingInput);
        }

        // Simulate processing time.
        tokio::time::sleep(self.delay).await;

        // A v4 uuid is already random; its low bits stand in for an RNG.
        let seed = Uuid::new_v4().as_u128();
        let topic = TOPICS[(seed % TOPICS.len() as u128) as usize];
        let pages = 5 + ((seed >> 16) % 20) as u64;

        Ok(Self::render(file_name, topic, pages))
    }
}
