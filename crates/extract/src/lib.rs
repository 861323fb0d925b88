pub mod error;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod schema;

pub use error::{ExtractError, ParseError};
pub use llm::{ChatClient, ChatConfig};
pub use parser::parse_summary_details;
pub use prompt::{ChatMessage, build_summary_messages, format_instructions};
pub use schema::SummaryDetails;

use tracing::debug;

/// The fixed extraction chain: prompt -> model -> parser.
///
/// There is no retry or repair loop; a response that does not parse into
/// `SummaryDetails` is returned as an error.
#[derive(Clone, Default)]
pub struct SummaryExtractor {
    llm_client: ChatClient,
}

impl SummaryExtractor {
    pub fn new(llm_client: ChatClient) -> Self {
        Self { llm_client }
    }

    /// Extract product class and city from a piece of text
    pub async fn extract(&self, input: &str) -> Result<SummaryDetails, ExtractError> {
        let messages = build_summary_messages(input);

        let raw = self.llm_client.complete(&messages).await?;
        debug!(response = %raw, "Extraction model responded");

        Ok(parse_summary_details(&raw)?)
    }
}
