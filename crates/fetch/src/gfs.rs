use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::download::{download_to, get_bytes};

pub const PRESSURE_LEVELS: [u32; 13] = [50, 100, 150, 200, 250, 300, 400, 500, 600, 700, 850, 925, 1000];

const SURFACE_VARIABLES: [(&str, &str); 8] = [
    ("u10m", "UGRD::10 m above ground"),
    ("v10m", "VGRD::10 m above ground"),
    ("u100m", "UGRD::100 m above ground"),
    ("v100m", "VGRD::100 m above ground"),
    ("t2m", "TMP::2 m above ground"),
    ("sp", "PRES::surface"),
    ("msl", "PRMSL::mean sea level"),
    ("tcwv", "PWAT::entire atmosphere (considered as a single layer)"),
];

const LEVEL_VARIABLES: [(&str, &str); 5] = [("u", "UGRD"), ("v", "VGRD"), ("z", "HGT"), ("t", "TMP"), ("r", "RH")];

/// The 73 SFNO input variables, surface fields first
pub fn sfno_variables() -> Vec<String> {
    let mut variables: Vec<String> = SURFACE_VARIABLES.iter().map(|(name, _)| name.to_string()).collect();
    for (prefix, _) in LEVEL_VARIABLES {
        for level in PRESSURE_LEVELS {
            variables.push(format!("{prefix}{level}"));
        }
    }
    variables
}

/// Map a variable name to its `NAME::level` key in the GFS inventory
pub fn lexicon_key(variable: &str) -> Option<String> {
    if let Some((_, key)) = SURFACE_VARIABLES.iter().find(|(name, _)| *name == variable) {
        return Some(key.to_string());
    }

    LEVEL_VARIABLES.iter().find_map(|(prefix, grib_name)| {
        let level: u32 = variable.strip_prefix(prefix)?.parse().ok()?;
        PRESSURE_LEVELS
            .contains(&level)
            .then(|| format!("{grib_name}::{level} mb"))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub key: String,
    pub start: u64,
    /// Inclusive end byte, `None` for the last message in the file
    pub end: Option<u64>,
}

impl InventoryEntry {
    pub fn range_header(&self) -> String {
        match self.end {
            Some(end) => format!("bytes={}-{}", self.start, end),
            None => format!("bytes={}-", self.start),
        }
    }
}

/// Parse a GRIB2 `.idx` file (`num:offset:d=date:NAME:level:forecast:`)
pub fn parse_inventory(text: &str) -> Result<Vec<InventoryEntry>> {
    let mut rows = Vec::new();

    for (line_no, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < 6 {
            anyhow::bail!("Malformed inventory line {}: {}", line_no + 1, line);
        }
        let start: u64 = fields[1]
            .parse()
            .with_context(|| format!("Bad byte offset on inventory line {}: {}", line_no + 1, line))?;
        rows.push((format!("{}::{}", fields[3], fields[4]), start));
    }

    let ends: Vec<Option<u64>> = rows
        .iter()
        .skip(1)
        .map(|(_, next_start)| Some(next_start.saturating_sub(1)))
        .chain(std::iter::once(None))
        .collect();

    Ok(rows
        .into_iter()
        .zip(ends)
        .map(|((key, start), end)| InventoryEntry { key, start, end })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GfsFetch {
    pub downloaded: usize,
    pub cached: usize,
}

/// Handle on the NOAA GFS 0.25 degree analysis archive
pub struct Gfs {
    client: reqwest::Client,
    base_url: String,
    cache_dir: PathBuf,
}

impl Gfs {
    pub fn new(client: reqwest::Client, config: &FetchConfig) -> Self {
        Self {
            client,
            base_url: config.gfs_url.trim_end_matches('/').to_string(),
            cache_dir: config.cache_dir.join("gfs"),
        }
    }

    pub fn grib_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/gfs.{}/00/atmos/gfs.t00z.pgrb2.0p25.f000",
            self.base_url,
            date.format("%Y%m%d")
        )
    }

    pub fn cache_path(&self, date: NaiveDate, variable: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}_00", date.format("%Y%m%d")))
            .join(format!("{variable}.grib2"))
    }

    /// Download the 00z analysis fields for `variables` into the cache
    pub async fn fetch(&self, date: NaiveDate, variables: &[String]) -> Result<GfsFetch> {
        let keys = variables
            .iter()
            .map(|v| lexicon_key(v).map(|k| (v, k)).with_context(|| format!("Unknown GFS variable: {v}")))
            .collect::<Result<Vec<_>>>()?;

        let mut summary = GfsFetch::default();
        let mut pending = Vec::new();
        for (variable, key) in keys {
            let path = self.cache_path(date, variable);
            if fs::try_exists(&path).await.unwrap_or(false) {
                summary.cached += 1;
            } else {
                pending.push((variable, key, path));
            }
        }

        if pending.is_empty() {
            debug!(date = %date, "All GFS variables already cached");
            return Ok(summary);
        }

        let grib_url = self.grib_url(date);
        let index = get_bytes(&self.client, &format!("{grib_url}.idx"), None).await?;
        let inventory = parse_inventory(&String::from_utf8_lossy(&index))?;

        for (variable, key, path) in pending {
            let entry = inventory
                .iter()
                .find(|e| e.key == key)
                .with_context(|| format!("{key} ({variable}) not found in GFS inventory for {date}"))?;

            download_to(&self.client, &grib_url, &path, Some(entry.range_header().as_str())).await?;
            summary.downloaded += 1;
        }

        info!(date = %date, downloaded = summary.downloaded, cached = summary.cached, "Fetched GFS analysis");
        Ok(summary)
    }
}
