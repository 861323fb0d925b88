pub mod chain;
pub mod config;
pub mod emails;
pub mod marker;
pub mod outcome;
pub mod runner;

pub use chain::{Chain, ChainResult, SentimentSummaryChain};
pub use config::AssessmentConfig;
pub use emails::{EmailRecord, load_emails};
pub use marker::{marker_exists, write_marker};
pub use outcome::AssessmentOutcome;
pub use runner::Assessment;

/// Run the assessment with default configuration against `chain`
pub async fn run_assessment<C: Chain + ?Sized>(chain: &C) -> anyhow::Result<AssessmentOutcome> {
    Assessment::default().run_assessment(chain).await
}
