use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub cache_dir: PathBuf,
    pub oedb_url: String,
    pub natural_earth_url: String,
    pub gfs_url: String,
    pub feature_category: String,
    pub feature_name: String,
    pub resolutions: Vec<String>,
    pub gfs_date: NaiveDate,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("earth2-composer");

        Self {
            cache_dir,
            oedb_url: "https://openenergyplatform.org/api/v0/schema/supply/tables/wind_turbine_library/rows/"
                .to_string(),
            natural_earth_url: "https://naturalearth.s3.amazonaws.com".to_string(),
            gfs_url: "https://noaa-gfs-bdp-pds.s3.amazonaws.com".to_string(),
            feature_category: "physical".to_string(),
            feature_name: "coastline".to_string(),
            resolutions: vec!["10m".to_string(), "50m".to_string(), "110m".to_string()],
            gfs_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default(),
        }
    }
}
