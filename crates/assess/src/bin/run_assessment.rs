use anyhow::Result;
use assess::{Assessment, AssessmentConfig, SentimentSummaryChain};
use extract::ChatClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AssessmentConfig::default();
    let chain = SentimentSummaryChain::new(ChatClient::new(config.chat.clone()));

    let assessment = Assessment::new(config);
    assessment.run_assessment(&chain).await?;

    Ok(())
}
