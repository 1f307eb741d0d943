use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ntm_release::ReleaseAsset;
use reqwest::blocking::Client;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);
const CHUNK_SIZE: usize = 64 * 1024;

/// Injected so the CLI can render a terminal bar and tests can record the
/// byte stream without touching a TTY.
pub trait DownloadProgress {
    fn start(&mut self, total: Option<u64>);
    fn advance(&mut self, bytes: u64);
    fn finish(&mut self);
}

pub struct SilentProgress;

impl DownloadProgress for SilentProgress {
    fn start(&mut self, _total: Option<u64>) {}
    fn advance(&mut self, _bytes: u64) {}
    fn finish(&mut self) {}
}

/// A client for asset payloads: same user agent as the catalog client, but
/// a generous timeout since archives run to tens of megabytes.
pub fn download_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .user_agent(user_agent)
        .build()
        .context("failed to build download client")
}

/// Stream the asset into `dest_dir`, reporting progress along the way.
pub fn download_asset(
    client: &Client,
    asset: &ReleaseAsset,
    dest_dir: &Path,
    progress: &mut dyn DownloadProgress,
) -> Result<PathBuf> {
    if asset.name.contains('/') || asset.name.contains('\\') {
        return Err(anyhow!("asset name contains path separators: {}", asset.name));
    }

    let url = &asset.browser_download_url;
    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to start download from {url}"))?;
    if !response.status().is_success() {
        return Err(anyhow!(
            "download returned {} for {url}",
            response.status()
        ));
    }

    let total = response
        .content_length()
        .or(if asset.size > 0 { Some(asset.size) } else { None });
    progress.start(total);

    let path = dest_dir.join(&asset.name);
    let mut file = fs::File::create(&path)
        .with_context(|| format!("failed to create download target: {}", path.display()))?;

    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let read = response
            .read(&mut buffer)
            .with_context(|| format!("download stream from {url} failed"))?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .with_context(|| format!("failed writing download to {}", path.display()))?;
        progress.advance(read as u64);
    }

    file.flush()
        .with_context(|| format!("failed flushing download to {}", path.display()))?;
    progress.finish();
    Ok(path)
}
