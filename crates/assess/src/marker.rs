use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Create (or truncate) the zero-byte success marker.
pub async fn write_marker(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create marker directory: {:?}", parent))?;
    }

    fs::write(path, b"")
        .await
        .with_context(|| format!("Failed to write marker file: {:?}", path))?;

    Ok(())
}

pub async fn marker_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
