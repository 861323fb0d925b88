use anyhow::Result;
use fetch::{FetchConfig, fetch_all};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = FetchConfig::default();
    fetch_all(&config).await?;

    println!("✅ Data cached under {:?}", config.cache_dir);
    Ok(())
}
