use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// GET `url` and return the body, failing on any non-2xx status.
/// A ranged request must come back as `206 Partial Content`.
pub async fn get_bytes(client: &reqwest::Client, url: &str, range: Option<&str>) -> Result<Vec<u8>> {
    let mut request = client.get(url);
    if let Some(range) = range {
        request = request.header(reqwest::header::RANGE, range);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Request to {} failed: {}", url, status);
    }
    if let Some(range) = range {
        if status != reqwest::StatusCode::PARTIAL_CONTENT {
            anyhow::bail!("Request to {} ignored range {}: got {}", url, range, status);
        }
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    Ok(bytes.to_vec())
}

/// Write `bytes` to `path`, creating parent directories first.
/// The data lands in a sibling `.part` file that is renamed into place, so a
/// failed write never leaves a truncated file at `path`.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let partial = partial_path(path);
    fs::write(&partial, bytes)
        .await
        .with_context(|| format!("Failed to write file: {:?}", partial))?;

    if let Err(e) = fs::rename(&partial, path).await {
        let _ = fs::remove_file(&partial).await;
        return Err(e).with_context(|| format!("Failed to move {:?} into place", partial));
    }

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Download `url` into `path` unless it is already cached.
/// Returns `true` when a download happened.
pub async fn download_to(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    range: Option<&str>,
) -> Result<bool> {
    if fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = ?path, "Already cached");
        return Ok(false);
    }

    let bytes = get_bytes(client, url, range).await?;
    write_file(path, &bytes).await?;
    info!(url = %url, path = ?path, bytes = bytes.len(), "Downloaded");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_skips_cached_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/file.bin")
            .with_status(200)
            .with_body("payload")
            .expect(1)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.bin");
        let client = reqwest::Client::new();
        let url = format!("{}/file.bin", server.url());

        assert!(download_to(&client, &url, &path, None).await.unwrap());
        assert!(!download_to(&client, &url, &path, None).await.unwrap());

        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_fails_on_status() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/missing").with_status(404).create_async().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");

        let err = download_to(&reqwest::Client::new(), &format!("{}/missing", server.url()), &path, None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("404"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_file_leaves_no_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gfs").join("msl.grib2");

        write_file(&path, b"grib").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"grib");
        assert_eq!(partial_path(&path), dir.path().join("gfs").join("msl.grib2.part"));
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_partial_file_is_not_treated_as_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/file.bin")
            .with_status(200)
            .with_body("payload")
            .expect(1)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");
        std::fs::write(partial_path(&path), b"pay").unwrap();

        let downloaded = download_to(&reqwest::Client::new(), &format!("{}/file.bin", server.url()), &path, None)
            .await
            .unwrap();

        assert!(downloaded);
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_range_ignored_by_server_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/grib")
            .with_status(200)
            .with_body("AAAAABBBBB")
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msl.grib2");

        let err = download_to(
            &reqwest::Client::new(),
            &format!("{}/grib", server.url()),
            &path,
            Some("bytes=0-4"),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("ignored range bytes=0-4"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_get_bytes_sends_range() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/grib")
            .match_header("range", "bytes=10-19")
            .with_status(206)
            .with_body("0123456789")
            .create_async()
            .await;

        let bytes = get_bytes(&reqwest::Client::new(), &format!("{}/grib", server.url()), Some("bytes=10-19"))
            .await
            .unwrap();

        assert_eq!(bytes, b"0123456789");
        mock.assert_async().await;
    }
}
