use anyhow::{Context, Result};
use ntm_core::{archive_ext, classify, parse_asset_name, AssetInfo, MatchQuality};
use ntm_release::ReleaseAsset;
use serde::Serialize;

/// Structured diagnostic for a resolution miss. The human rendering and the
/// JSON form share this one value.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeReport {
    pub platform: String,
    pub convention: String,
    pub tried_names: Vec<String>,
    pub available_assets: Vec<AssetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_match: Option<AssetInfo>,
    pub release_url: String,
}

pub fn build_report(
    assets: &[ReleaseAsset],
    os: &str,
    arch: &str,
    tried_names: Vec<String>,
    release_url: &str,
) -> UpgradeReport {
    let mut available = Vec::with_capacity(assets.len());
    for asset in assets {
        let mut info = parse_asset_name(&asset.name);
        classify(&mut info, os, arch);
        available.push(info);
    }

    // exact > close > none, catalog order breaking ties
    let closest = available
        .iter()
        .min_by_key(|info| match info.quality {
            MatchQuality::Exact => 0,
            MatchQuality::Close => 1,
            MatchQuality::None => 2,
        })
        .filter(|info| info.quality != MatchQuality::None)
        .cloned();

    UpgradeReport {
        platform: format!("{os}/{arch}"),
        convention: format!("ntm_{{version}}_{{os}}_{{arch}}.{}", archive_ext(os)),
        tried_names,
        available_assets: available,
        closest_match: closest,
        release_url: release_url.to_string(),
    }
}

impl UpgradeReport {
    pub fn render_human(&self, issues_url: &str) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "no release asset matches this platform: {}",
            self.platform
        ));
        lines.push(format!("expected naming convention: {}", self.convention));
        lines.push("names tried, in order:".to_string());
        for name in &self.tried_names {
            lines.push(format!("  - {name}"));
        }

        if self.available_assets.is_empty() {
            lines.push("the release carries no assets at all".to_string());
        } else {
            lines.push("assets available in the release:".to_string());
            for info in &self.available_assets {
                lines.push(format!("  {}", render_asset_line(info)));
            }
        }

        if let Some(closest) = &self.closest_match {
            lines.push(format!(
                "closest candidate: {}{}",
                closest.name,
                closest
                    .reason
                    .as_deref()
                    .map(|reason| format!(" ({reason})"))
                    .unwrap_or_default()
            ));
        }

        lines.push(
            "the release pipeline's asset naming and this resolver must agree; \
             one of the two is out of date"
                .to_string(),
        );
        lines.push(format!("releases: {}", self.release_url));
        lines.push(format!("report this at: {issues_url}"));
        lines
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize upgrade report")
    }
}

fn render_asset_line(info: &AssetInfo) -> String {
    let marker = match info.quality {
        MatchQuality::Exact => '?',
        MatchQuality::Close => '≈',
        MatchQuality::None => '✗',
    };
    let platform = match (info.os.as_deref(), info.arch.as_deref()) {
        (Some(os), Some(arch)) => format!(" ({os}/{arch})"),
        _ => String::new(),
    };
    let reason = info
        .reason
        .as_deref()
        .map(|reason| format!(": {reason}"))
        .unwrap_or_default();
    format!("{marker} {}{platform}{reason}", info.name)
}
