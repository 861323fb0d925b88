pub mod config;
pub mod download;
pub mod gfs;
pub mod natural_earth;
pub mod turbines;

pub use config::FetchConfig;
pub use gfs::{Gfs, GfsFetch, sfno_variables};
pub use natural_earth::NaturalEarthFeature;
pub use turbines::{TurbineSummary, store_turbine_data};

use anyhow::Result;

/// Warm every dataset cache the composer exercise needs, in order:
/// turbine library, coastline geometry at each resolution, GFS analysis.
pub async fn fetch_all(config: &FetchConfig) -> Result<()> {
    let client = reqwest::Client::new();

    println!("Fetching wind turbine library...");
    store_turbine_data(&client, config).await?;

    for resolution in &config.resolutions {
        println!("Fetching {} {} at {}...", config.feature_category, config.feature_name, resolution);
        NaturalEarthFeature::new(&config.feature_category, &config.feature_name, resolution)
            .fetch(&client, config)
            .await?;
    }

    println!("Fetching GFS analysis for {}...", config.gfs_date);
    Gfs::new(client, config).fetch(config.gfs_date, &sfno_variables()).await?;

    Ok(())
}
