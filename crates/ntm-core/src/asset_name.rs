use serde::Serialize;

use crate::platform::normalized_arch;
use crate::version::normalize_version;

pub const TOOL_NAME: &str = "ntm";

const KNOWN_EXTENSIONS: &[&str] = &["tar.gz", "tgz", "zip", "exe"];

/// How one remote asset relates to the requested platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Exact,
    Close,
    None,
}

/// A remote asset name parsed against the naming contract, plus its
/// classification for the requested platform. Feeds the failure report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(rename = "match")]
    pub quality: MatchQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn archive_ext(os: &str) -> &'static str {
    if os == "windows" {
        "zip"
    } else {
        "tar.gz"
    }
}

/// Canonical archive name: `ntm_<version>_<os>_<normalizedArch>.<ext>`.
pub fn archive_name(version: &str, os: &str, arch: &str) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        TOOL_NAME,
        normalize_version(version),
        os,
        normalized_arch(os, arch),
        archive_ext(os)
    )
}

/// Canonical bare-binary name: `ntm_<os>_<normalizedArch>`.
pub fn binary_name(os: &str, arch: &str) -> String {
    format!("{}_{}_{}", TOOL_NAME, os, normalized_arch(os, arch))
}

/// Legacy dash form, accepted on ingest only. Arch is taken as given.
pub fn legacy_archive_name(version: &str, os: &str, arch: &str) -> String {
    format!("{}-{}-{}-{}", TOOL_NAME, normalize_version(version), os, arch)
}

pub fn legacy_binary_name(os: &str, arch: &str) -> String {
    format!("{TOOL_NAME}-{os}-{arch}")
}

/// Parse an arbitrary asset filename. Splits on the extension first, then
/// by `_` (canonical) or `-` (legacy). A 4-token base carries a version,
/// a 3-token base does not; anything else yields no platform fields.
pub fn parse_asset_name(name: &str) -> AssetInfo {
    let mut info = AssetInfo {
        name: name.to_string(),
        os: None,
        arch: None,
        version: None,
        extension: None,
        quality: MatchQuality::None,
        reason: None,
    };

    let lower = name.to_ascii_lowercase();
    let mut base = name;
    for ext in KNOWN_EXTENSIONS {
        if lower.ends_with(&format!(".{ext}")) {
            base = &name[..name.len() - ext.len() - 1];
            info.extension = Some((*ext).to_string());
            break;
        }
    }

    let separator = if base.contains('_') { '_' } else { '-' };
    let tokens: Vec<&str> = base.split(separator).collect();
    match tokens.as_slice() {
        [TOOL_NAME, version, os, arch] => {
            info.version = Some((*version).to_string());
            info.os = Some((*os).to_string());
            info.arch = Some((*arch).to_string());
        }
        [TOOL_NAME, os, arch] => {
            info.os = Some((*os).to_string());
            info.arch = Some((*arch).to_string());
        }
        _ => {}
    }

    info
}

/// Classify a parsed asset against the requested platform and record the
/// outcome on the info itself.
pub fn classify(info: &mut AssetInfo, target_os: &str, target_arch: &str) {
    let (Some(os), Some(arch)) = (info.os.as_deref(), info.arch.as_deref()) else {
        info.quality = MatchQuality::None;
        info.reason = Some("filename does not follow the naming contract".to_string());
        return;
    };

    if os != target_os {
        info.quality = MatchQuality::None;
        info.reason = Some(format!("built for {os}, not {target_os}"));
        return;
    }

    // `armv7` counts as exact for a requested `arm`, but the darwin
    // universal sentinel stays a close match per the naming contract.
    let normalized_target = normalized_arch(target_os, target_arch);
    if arch == target_arch || (arch != "all" && arch == normalized_target) {
        info.quality = MatchQuality::Exact;
        info.reason = None;
        return;
    }

    info.quality = MatchQuality::Close;
    info.reason = Some(if arch == "all" {
        format!("universal (all) build vs requested {target_arch}")
    } else if target_arch == "all" {
        format!("{arch} build vs requested universal (all)")
    } else {
        "same OS, different arch".to_string()
    });
}
