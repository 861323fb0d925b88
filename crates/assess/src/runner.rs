use anyhow::{Context, Result};
use extract::{ChatClient, SummaryExtractor};
use tracing::{debug, info};

use crate::chain::Chain;
use crate::config::AssessmentConfig;
use crate::emails::{EmailRecord, load_emails};
use crate::marker::write_marker;
use crate::outcome::AssessmentOutcome;

pub struct Assessment {
    config: AssessmentConfig,
    extractor: SummaryExtractor,
}

impl Assessment {
    pub fn new(config: AssessmentConfig) -> Self {
        let extractor = SummaryExtractor::new(ChatClient::new(config.chat.clone()));
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(config: AssessmentConfig, extractor: SummaryExtractor) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Load the emails from the configured path and run the assessment
    pub async fn run_assessment<C: Chain + ?Sized>(&self, chain: &C) -> Result<AssessmentOutcome> {
        let emails = load_emails(&self.config.emails_path).await?;
        info!(count = emails.len(), path = ?self.config.emails_path, "Loaded emails");

        self.run(chain, &emails).await
    }

    /// Run the student chain, extract its summary details and grade them.
    /// The marker file is written only when both fields match.
    pub async fn run<C: Chain + ?Sized>(&self, chain: &C, emails: &[EmailRecord]) -> Result<AssessmentOutcome> {
        println!("Passing emails into your chain...");
        let student_results = chain.invoke(emails).await.context("Chain invocation failed")?;
        println!("Your chain completed successfully.\n");
        debug!(result = %student_results, "Chain produced result");

        println!(
            "Checking whether your chain's summary correctly identified the product class with the most negative sentiments..."
        );
        let details = self
            .extractor
            .extract(student_results.as_str())
            .await
            .context("Failed to extract summary details from chain result")?;
        info!(product_class = %details.product_class, city = %details.city, "Extracted summary details");

        let outcome = AssessmentOutcome::grade(
            &details,
            &self.config.expected_product_class,
            &self.config.expected_city,
        );

        if outcome.correct_product_class {
            println!(
                "Your chain's summary correctly identified the product class with the most negative sentiment.\n"
            );
        } else {
            println!(
                "Your chain's summary did NOT correctly identify the product class with the most negative sentiment.\n"
            );
        }

        println!(
            "Checking whether your chain's summary correctly identified the location with the most negative sentiments..."
        );
        if outcome.correct_city {
            println!("Your chain's summary correctly identified the city with the most negative sentiment.\n");
        } else {
            println!("Your chain's summary did NOT correctly identify the city with the most negative sentiment.\n");
        }

        if outcome.passed() {
            write_marker(&self.config.marker_path).await?;
            info!(marker = ?self.config.marker_path, "Wrote success marker");
            println!(
                "You successfully completed the assessment, congrats! Please see below for instructions on how to generate your certificate"
            );
        } else {
            println!("You did not successfully complete the assessment, please continue your work and try again.");
        }

        Ok(outcome)
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new(AssessmentConfig::default())
    }
}
