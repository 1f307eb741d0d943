use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ntm_release::ChecksumManifest;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumStatus {
    Verified,
    /// The manifest is absent or lacks an entry for the asset. The upgrade
    /// may proceed; the caller owns the warning.
    Unverified(String),
}

pub fn sha256_hex_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("failed to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("failed reading {} for hashing", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compare the downloaded file against the published digest. A mismatch is
/// fatal and must abort before the installed binary is touched.
pub fn verify_checksum(
    path: &Path,
    asset_name: &str,
    manifest: Option<&ChecksumManifest>,
) -> Result<ChecksumStatus> {
    let Some(manifest) = manifest else {
        return Ok(ChecksumStatus::Unverified(
            "release publishes no checksum manifest".to_string(),
        ));
    };
    let Some(expected) = manifest.digest_for(asset_name) else {
        return Ok(ChecksumStatus::Unverified(format!(
            "checksum manifest has no entry for {asset_name}"
        )));
    };

    let actual = sha256_hex_file(path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(anyhow!(
            "checksum mismatch for {asset_name}: manifest says {expected}, downloaded file is {actual}"
        ));
    }
    Ok(ChecksumStatus::Verified)
}
