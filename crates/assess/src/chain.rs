use anyhow::{Context, Result};
use async_trait::async_trait;
use extract::{ChatClient, ChatMessage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::emails::EmailRecord;

/// Text produced by a chain, handed unmodified to the extraction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResult(pub String);

impl ChainResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChainResult {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ChainResult {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for ChainResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A processing pipeline run over the full email collection
#[async_trait]
pub trait Chain: Send + Sync {
    async fn invoke(&self, emails: &[EmailRecord]) -> Result<ChainResult>;
}

#[async_trait]
impl<C: Chain + ?Sized> Chain for Arc<C> {
    async fn invoke(&self, emails: &[EmailRecord]) -> Result<ChainResult> {
        (**self).invoke(emails).await
    }
}

#[async_trait]
impl<C: Chain + ?Sized> Chain for Box<C> {
    async fn invoke(&self, emails: &[EmailRecord]) -> Result<ChainResult> {
        (**self).invoke(emails).await
    }
}

/// Reference chain: asks the model which product class and city drew the
/// most negative sentiment across all emails.
pub struct SentimentSummaryChain {
    llm_client: ChatClient,
}

impl SentimentSummaryChain {
    pub fn new(llm_client: ChatClient) -> Self {
        Self { llm_client }
    }

    fn build_prompt(emails: &[EmailRecord]) -> Result<String> {
        let rendered = serde_json::to_string_pretty(emails).context("Failed to render emails")?;

        Ok(format!(
            r#"Below is a collection of customer emails about product orders.

For every email, decide whether its sentiment is positive or negative, which product class it concerns, and which city the customer is in.

Then write a short summary naming the product class with the most negative sentiment and the city with the most negative sentiment.

EMAILS:
{}

SUMMARY:"#,
            rendered
        ))
    }
}

#[async_trait]
impl Chain for SentimentSummaryChain {
    async fn invoke(&self, emails: &[EmailRecord]) -> Result<ChainResult> {
        let prompt = Self::build_prompt(emails)?;

        let summary = self
            .llm_client
            .complete(&[
                ChatMessage::system("You are an analyst who reads customer emails and summarizes complaints."),
                ChatMessage::user(prompt),
            ])
            .await
            .context("Sentiment summary request failed")?;

        Ok(ChainResult(summary))
    }
}
