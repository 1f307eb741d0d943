use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Where releases are published. A value rather than embedded constants so
/// alternative hosts (mirrors, air-gapped forges) stay unit-testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamProfile {
    /// Latest-release endpoint returning the release descriptor JSON.
    pub api_url: String,
    /// Human-facing releases page, referenced in failure reports.
    pub releases_url: String,
    /// Issue tracker, referenced in failure reports.
    pub issues_url: String,
    /// Well-known name of the digest manifest asset.
    pub checksum_asset: String,
    pub user_agent: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileOverride {
    api_url: Option<String>,
    releases_url: Option<String>,
    issues_url: Option<String>,
    checksum_asset: Option<String>,
    user_agent: Option<String>,
}

impl Default for UpstreamProfile {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com/repos/ntm-sh/ntm/releases/latest".to_string(),
            releases_url: "https://github.com/ntm-sh/ntm/releases".to_string(),
            issues_url: "https://github.com/ntm-sh/ntm/issues".to_string(),
            checksum_asset: "checksums.txt".to_string(),
            user_agent: format!("ntm-upgrade/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl UpstreamProfile {
    /// The built-in profile, with fields overridden from
    /// `$NTM_UPSTREAM_FILE` or `~/.ntm/upstream.toml` when present.
    pub fn load() -> Result<Self> {
        let mut profile = Self::default();
        if let Some(path) = override_path() {
            profile.apply_override_file(Path::new(&path))?;
        }
        Ok(profile)
    }

    pub fn apply_override_file(&mut self, path: &Path) -> Result<()> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read upstream profile: {}", path.display())
                });
            }
        };
        let overrides: ProfileOverride = toml::from_str(&raw)
            .with_context(|| format!("failed to parse upstream profile: {}", path.display()))?;
        self.apply(overrides);
        Ok(())
    }

    pub fn apply_override_str(&mut self, raw: &str) -> Result<()> {
        let overrides: ProfileOverride =
            toml::from_str(raw).context("failed to parse upstream profile")?;
        self.apply(overrides);
        Ok(())
    }

    fn apply(&mut self, overrides: ProfileOverride) {
        if let Some(value) = overrides.api_url {
            self.api_url = value;
        }
        if let Some(value) = overrides.releases_url {
            self.releases_url = value;
        }
        if let Some(value) = overrides.issues_url {
            self.issues_url = value;
        }
        if let Some(value) = overrides.checksum_asset {
            self.checksum_asset = value;
        }
        if let Some(value) = overrides.user_agent {
            self.user_agent = value;
        }
    }
}

fn override_path() -> Option<String> {
    if let Ok(path) = std::env::var("NTM_UPSTREAM_FILE") {
        if !path.trim().is_empty() {
            return Some(path);
        }
    }
    let home = std::env::var("HOME").ok()?;
    Some(format!("{home}/.ntm/upstream.toml"))
}
