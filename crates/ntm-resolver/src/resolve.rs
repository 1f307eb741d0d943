use ntm_core::{
    archive_name, binary_name, compatible_archs, legacy_archive_name, legacy_binary_name,
    normalize_version, normalized_arch, parse_asset_name, TOOL_NAME,
};
use ntm_release::ReleaseAsset;

use crate::types::{MatchResult, Strategy};

const KNOWN_EXTENSIONS: &[&str] = &[".tar.gz", ".tgz", ".zip", ".exe"];

/// Pick the best asset for the platform tuple using the strategy ladder.
/// First match wins; within a step, assets are probed in catalog order.
/// Returns the match (if any) and the names tried along the way, for the
/// failure report.
pub fn resolve<'a>(
    assets: &'a [ReleaseAsset],
    os: &str,
    arch: &str,
    version: &str,
    strict: bool,
) -> (Option<MatchResult<'a>>, Vec<String>) {
    let mut tried = Vec::new();

    let want_archive = archive_name(version, os, arch);
    tried.push(want_archive.clone());
    if let Some(asset) = assets.iter().find(|asset| asset.name == want_archive) {
        let result = MatchResult::new(
            asset,
            Strategy::ExactArchive,
            "canonical archive name".to_string(),
        );
        return (Some(result), tried);
    }

    let want_binary = binary_name(os, arch);
    tried.push(want_binary.clone());
    if let Some(asset) = assets
        .iter()
        .find(|asset| base_name(&asset.name) == want_binary)
    {
        let result = MatchResult::new(
            asset,
            Strategy::ExactBinary,
            "canonical bare-binary name".to_string(),
        );
        return (Some(result), tried);
    }

    if strict {
        return (None, tried);
    }

    let versioned_prefix = format!(
        "{}_{}_{}_{}",
        TOOL_NAME,
        normalize_version(version),
        os,
        normalized_arch(os, arch)
    );
    tried.push(format!("{want_binary}*"));
    tried.push(format!("{versioned_prefix}*"));
    if let Some(asset) = assets.iter().find(|asset| {
        let base = base_name(&asset.name);
        base.starts_with(&want_binary) || base.starts_with(&versioned_prefix)
    }) {
        let result = MatchResult::new(
            asset,
            Strategy::PrefixMatch,
            "name shares the canonical prefix".to_string(),
        );
        return (Some(result), tried);
    }

    let candidates = compatible_archs(os, arch);
    tried.push(format!("any {os} asset with compatible arch"));
    for (candidate, description) in &candidates {
        // Legacy dash names get their own step so strategy attribution in
        // diagnostics stays stable.
        let found = assets.iter().find(|asset| {
            if asset.name.starts_with(&format!("{TOOL_NAME}-")) {
                return false;
            }
            let info = parse_asset_name(&asset.name);
            info.os.as_deref() == Some(os) && info.arch.as_deref() == Some(candidate.as_str())
        });
        if let Some(asset) = found {
            let result = MatchResult::new(
                asset,
                Strategy::FuzzySameOs,
                format!("same OS, {description}"),
            );
            return (Some(result), tried);
        }
    }

    for (candidate, _) in &candidates {
        for legacy in [
            legacy_archive_name(version, os, candidate),
            legacy_binary_name(os, candidate),
        ] {
            tried.push(legacy.clone());
            if let Some(asset) = assets.iter().find(|asset| base_name(&asset.name) == legacy) {
                let result = MatchResult::new(
                    asset,
                    Strategy::LegacyDash,
                    "legacy dash-separated name".to_string(),
                );
                return (Some(result), tried);
            }
        }
    }

    (None, tried)
}

fn base_name(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    for ext in KNOWN_EXTENSIONS {
        if lower.ends_with(ext) {
            return &name[..name.len() - ext.len()];
        }
    }
    name
}
