use anyhow::Result;
use std::path::PathBuf;

use crate::config::FetchConfig;
use crate::download::download_to;

/// A named Natural Earth dataset at one resolution (`10m`, `50m`, `110m`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalEarthFeature {
    pub category: String,
    pub name: String,
    pub resolution: String,
}

impl NaturalEarthFeature {
    pub fn new(category: &str, name: &str, resolution: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            resolution: resolution.to_string(),
        }
    }

    fn file_stem(&self) -> String {
        format!("ne_{}_{}", self.resolution, self.name)
    }

    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}_{}/{}.zip",
            base_url.trim_end_matches('/'),
            self.resolution,
            self.category,
            self.file_stem()
        )
    }

    pub fn cache_path(&self, config: &FetchConfig) -> PathBuf {
        config
            .cache_dir
            .join("natural_earth")
            .join(&self.category)
            .join(format!("{}.zip", self.file_stem()))
    }

    /// Make sure the shapefile archive is in the cache; returns its path
    pub async fn fetch(&self, client: &reqwest::Client, config: &FetchConfig) -> Result<PathBuf> {
        let path = self.cache_path(config);
        download_to(client, &self.url(&config.natural_earth_url), &path, None).await?;
        Ok(path)
    }
}
