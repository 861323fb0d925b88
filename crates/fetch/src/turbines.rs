use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::download::{get_bytes, write_file};

pub const TURBINE_DATA_FILE: &str = "oedb_turbine_data.json";
pub const POWER_CURVES_FILE: &str = "oedb_power_curves.json";
pub const POWER_COEFFICIENT_CURVES_FILE: &str = "oedb_power_coefficient_curves.json";

/// Which curve columns of a registry row to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Power,
    PowerCoefficient,
}

impl CurveKind {
    fn flag(self) -> &'static str {
        match self {
            CurveKind::Power => "has_power_curve",
            CurveKind::PowerCoefficient => "has_cp_curve",
        }
    }

    fn column_prefix(self) -> &'static str {
        match self {
            CurveKind::Power => "power_curve",
            CurveKind::PowerCoefficient => "power_coefficient_curve",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            CurveKind::Power => POWER_CURVES_FILE,
            CurveKind::PowerCoefficient => POWER_COEFFICIENT_CURVES_FILE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineCurve {
    pub turbine_type: String,
    pub wind_speeds: Vec<f64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurbineSummary {
    pub turbines: usize,
    pub power_curves: usize,
    pub power_coefficient_curves: usize,
}

/// Pull the wind turbine library from the open energy database and store
/// the raw rows plus the extracted power and power coefficient curves in the
/// cache directory.
pub async fn store_turbine_data(client: &reqwest::Client, config: &FetchConfig) -> Result<TurbineSummary> {
    let body = get_bytes(client, &config.oedb_url, None).await?;
    let rows: Vec<Value> =
        serde_json::from_slice(&body).context("Turbine library response is not a JSON array")?;

    write_file(&config.cache_dir.join(TURBINE_DATA_FILE), &body).await?;

    let power_curves = store_curves(&rows, CurveKind::Power, config).await?;
    let power_coefficient_curves = store_curves(&rows, CurveKind::PowerCoefficient, config).await?;

    info!(
        turbines = rows.len(),
        power_curves,
        power_coefficient_curves,
        "Stored turbine data"
    );

    Ok(TurbineSummary {
        turbines: rows.len(),
        power_curves,
        power_coefficient_curves,
    })
}

async fn store_curves(rows: &[Value], kind: CurveKind, config: &FetchConfig) -> Result<usize> {
    let curves: Vec<TurbineCurve> = rows.iter().filter_map(|row| curve(row, kind)).collect();
    let curves_json = serde_json::to_vec_pretty(&curves)?;
    write_file(&config.cache_dir.join(kind.file_name()), &curves_json).await?;
    Ok(curves.len())
}

fn curve(row: &Value, kind: CurveKind) -> Option<TurbineCurve> {
    if !row.get(kind.flag()).and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let prefix = kind.column_prefix();
    let turbine_type = row.get("turbine_type")?.as_str()?.to_string();
    let wind_speeds = numeric_array(row.get(format!("{prefix}_wind_speeds").as_str())?);
    let values = numeric_array(row.get(format!("{prefix}_values").as_str())?);

    match (wind_speeds, values) {
        (Some(wind_speeds), Some(values)) if wind_speeds.len() == values.len() => Some(TurbineCurve {
            turbine_type,
            wind_speeds,
            values,
        }),
        _ => {
            warn!(turbine_type = %turbine_type, ?kind, "Skipping malformed curve");
            None
        }
    }
}

/// The registry stores curves either as JSON arrays or as strings holding one
fn numeric_array(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        Value::String(s) => serde_json::from_str::<Vec<f64>>(s).ok(),
        _ => None,
    }
}
