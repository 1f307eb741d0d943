use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::checksums::ChecksumManifest;
use crate::profile::UpstreamProfile;

const CATALOG_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub browser_download_url: String,
    #[serde(default)]
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

pub struct CatalogClient {
    http: Client,
    profile: UpstreamProfile,
}

impl CatalogClient {
    pub fn new(profile: UpstreamProfile) -> Result<Self> {
        let http = Client::builder()
            .timeout(CATALOG_TIMEOUT)
            .user_agent(profile.user_agent.clone())
            .build()
            .context("failed to build release catalog client")?;
        Ok(Self { http, profile })
    }

    pub fn profile(&self) -> &UpstreamProfile {
        &self.profile
    }

    /// The latest published release. `Ok(None)` when the index reports 404,
    /// which means nothing has been published yet (development builds).
    pub fn fetch_latest(&self) -> Result<Option<ReleaseDescriptor>> {
        let url = &self.profile.api_url;
        let response = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .with_context(|| format!("failed to reach release index at {url}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!(
                "release index returned {} for {url}",
                response.status()
            ));
        }

        let descriptor = response
            .json::<ReleaseDescriptor>()
            .with_context(|| format!("failed to parse release descriptor from {url}"))?;
        Ok(Some(descriptor))
    }

    /// The release's digest manifest. `Ok(None)` when the release ships no
    /// checksum asset; callers may proceed with a warning.
    pub fn fetch_checksums(&self, release: &ReleaseDescriptor) -> Result<Option<ChecksumManifest>> {
        let Some(asset) = release
            .assets
            .iter()
            .find(|asset| asset.name == self.profile.checksum_asset)
        else {
            return Ok(None);
        };

        let url = &asset.browser_download_url;
        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("failed to download checksum manifest from {url}"))?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "checksum manifest download returned {} for {url}",
                response.status()
            ));
        }

        let text = response
            .text()
            .with_context(|| format!("failed to read checksum manifest body from {url}"))?;
        ChecksumManifest::parse(&text).map(Some)
    }
}
