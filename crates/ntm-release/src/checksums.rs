use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

/// Digest manifest published alongside a release, mapping asset names to
/// lowercase hex SHA-256 digests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: BTreeMap<String, String>,
}

impl ChecksumManifest {
    /// Parse the `<hex>  <name>` text format. Both the BSD two-space and
    /// GNU single-space forms are accepted; the filename is the last token
    /// so intermediate path components are tolerated. Comment lines and
    /// blanks are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                return Err(anyhow!("malformed checksum line: {line}"));
            }
            let digest = tokens[0];
            let path = tokens[tokens.len() - 1];
            let name = path.rsplit('/').next().unwrap_or(path);
            entries.insert(name.to_string(), digest.to_ascii_lowercase());
        }

        if entries.is_empty() {
            return Err(anyhow!("checksum manifest contains no entries"));
        }
        Ok(Self { entries })
    }

    pub fn digest_for(&self, asset_name: &str) -> Option<&str> {
        self.entries.get(asset_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
