use ntm_release::ReleaseAsset;

use super::*;

fn asset(name: &str) -> ReleaseAsset {
    ReleaseAsset {
        name: name.to_string(),
        size: 1024,
        browser_download_url: format!("https://example.test/{name}"),
        content_type: "application/octet-stream".to_string(),
    }
}

#[test]
fn exact_archive_wins_with_full_confidence() {
    let assets = vec![
        asset("checksums.txt"),
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
    ];
    let (result, tried) = resolve(&assets, "linux", "amd64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.asset.name, "ntm_1.4.1_linux_amd64.tar.gz");
    assert_eq!(result.strategy, Strategy::ExactArchive);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(tried[0], "ntm_1.4.1_linux_amd64.tar.gz");
}

#[test]
fn exact_binary_matches_base_name_without_extension() {
    let assets = vec![asset("ntm_windows_amd64.exe")];
    let (result, _) = resolve(&assets, "windows", "amd64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.strategy, Strategy::ExactBinary);
    assert_eq!(result.confidence, 0.9);
}

#[test]
fn darwin_arm64_prefers_the_arm64_build_over_amd64() {
    let assets = vec![
        asset("ntm_1.4.1_darwin_amd64.tar.gz"),
        asset("ntm_1.4.1_darwin_arm64.tar.gz"),
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
    ];
    let (result, _) = resolve(&assets, "darwin", "arm64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.asset.name, "ntm_1.4.1_darwin_arm64.tar.gz");
    assert_eq!(result.strategy, Strategy::FuzzySameOs);
    assert!(result.confidence >= 0.5);
    assert_eq!(result.reason, "same OS, native arm64 build");
}

#[test]
fn darwin_arm64_falls_back_to_amd64_via_rosetta() {
    let assets = vec![
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
        asset("ntm_1.4.1_darwin_amd64.tar.gz"),
    ];
    let (result, _) = resolve(&assets, "darwin", "arm64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.asset.name, "ntm_1.4.1_darwin_amd64.tar.gz");
    assert_eq!(result.reason, "same OS, amd64 via Rosetta 2");
}

#[test]
fn strict_mode_refuses_every_fallback() {
    let assets = vec![
        asset("ntm_1.4.1_darwin_amd64.tar.gz"),
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
    ];
    let (result, tried) = resolve(&assets, "darwin", "arm64", "1.4.1", true);
    assert!(result.is_none());
    assert!(!tried.is_empty());
    // Only the two canonical names may be probed in strict mode.
    assert_eq!(
        tried,
        vec!["ntm_1.4.1_darwin_all.tar.gz", "ntm_darwin_all"]
    );
}

#[test]
fn strict_mode_still_admits_the_canonical_archive() {
    let assets = vec![asset("ntm_1.4.1_darwin_all.tar.gz")];
    let (result, _) = resolve(&assets, "darwin", "arm64", "1.4.1", true);
    let result = result.expect("must match");
    assert_eq!(result.strategy, Strategy::ExactArchive);
}

#[test]
fn prefix_match_accepts_decorated_canonical_names() {
    let assets = vec![asset("ntm_1.4.1_linux_amd64-static.tar.gz")];
    let (result, _) = resolve(&assets, "linux", "amd64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.strategy, Strategy::PrefixMatch);
    assert_eq!(result.confidence, 0.7);
}

#[test]
fn legacy_dash_asset_is_accepted_at_low_confidence() {
    let assets = vec![asset("checksums.txt"), asset("ntm-1.4.1-darwin-arm64.tar.gz")];
    let (result, _) = resolve(&assets, "darwin", "arm64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.asset.name, "ntm-1.4.1-darwin-arm64.tar.gz");
    assert_eq!(result.strategy, Strategy::LegacyDash);
    assert_eq!(result.confidence, 0.3);
}

#[test]
fn fuzzy_step_skips_legacy_names_so_attribution_stays_stable() {
    // The dash-form asset parses to the right platform, but only the
    // legacy_dash step may claim it.
    let assets = vec![asset("ntm-1.4.1-linux-amd64.tar.gz")];
    let (result, _) = resolve(&assets, "linux", "amd64", "1.4.1", false);
    let result = result.expect("must match");
    assert_eq!(result.strategy, Strategy::LegacyDash);
}

#[test]
fn tried_names_record_the_fuzzy_step_as_one_synthetic_label() {
    let (result, tried) = resolve(&[], "linux", "amd64", "1.4.1", false);
    assert!(result.is_none());
    assert_eq!(
        tried
            .iter()
            .filter(|name| name.as_str() == "any linux asset with compatible arch")
            .count(),
        1
    );
    assert!(tried.contains(&"ntm-1.4.1-linux-amd64".to_string()));
    assert!(tried.contains(&"ntm-linux-amd64".to_string()));
}

#[test]
fn resolution_miss_returns_no_match_for_foreign_platform() {
    let assets = vec![asset("ntm_1.4.1_linux_amd64.tar.gz")];
    let (result, tried) = resolve(&assets, "freebsd", "arm64", "1.4.1", false);
    assert!(result.is_none());
    assert!(tried.len() >= 4);
}

#[test]
fn report_classifies_every_asset_exactly_once() {
    let assets = vec![
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
        asset("ntm_1.4.1_darwin_all.tar.gz"),
        asset("checksums.txt"),
    ];
    let report = build_report(
        &assets,
        "freebsd",
        "arm64",
        vec!["ntm_1.4.1_freebsd_arm64.tar.gz".to_string()],
        "https://example.test/releases",
    );
    assert_eq!(report.available_assets.len(), assets.len());
    for a in &assets {
        assert_eq!(
            report
                .available_assets
                .iter()
                .filter(|info| info.name == a.name)
                .count(),
            1,
            "{} must appear exactly once",
            a.name
        );
    }
    assert!(report.closest_match.is_none());
}

#[test]
fn report_picks_the_closest_match_by_quality_then_catalog_order() {
    let assets = vec![
        asset("ntm_1.4.1_linux_arm64.tar.gz"),
        asset("ntm_1.4.1_linux_386.tar.gz"),
        asset("checksums.txt"),
    ];
    let report = build_report(
        &assets,
        "linux",
        "amd64",
        Vec::new(),
        "https://example.test/releases",
    );
    let closest = report.closest_match.expect("must pick a candidate");
    assert_eq!(closest.name, "ntm_1.4.1_linux_arm64.tar.gz");
}

#[test]
fn human_report_names_the_contract_and_the_escalation_paths() {
    let assets = vec![
        asset("ntm_1.4.1_linux_amd64.tar.gz"),
        asset("checksums.txt"),
    ];
    let report = build_report(
        &assets,
        "freebsd",
        "arm64",
        vec!["ntm_1.4.1_freebsd_arm64.tar.gz".to_string()],
        "https://example.test/releases",
    );
    let text = report
        .render_human("https://example.test/issues")
        .join("\n");
    assert!(text.contains("freebsd/arm64"));
    assert!(text.contains("ntm_{version}_{os}_{arch}.tar.gz"));
    assert!(text.contains("ntm_1.4.1_freebsd_arm64.tar.gz"));
    assert!(text.contains("✗"));
    assert!(text.contains("(linux/amd64)"));
    assert!(text.contains("https://example.test/releases"));
    assert!(text.contains("https://example.test/issues"));
    assert!(text.contains("resolver"));
}

#[test]
fn human_report_marks_close_assets() {
    let assets = vec![asset("ntm_1.4.1_linux_arm64.tar.gz")];
    let report = build_report(&assets, "linux", "amd64", Vec::new(), "https://r.test");
    let text = report.render_human("https://i.test").join("\n");
    assert!(text.contains("≈ ntm_1.4.1_linux_arm64.tar.gz"));
    assert!(text.contains("same OS, different arch"));
}

#[test]
fn json_report_uses_stable_field_names() {
    let assets = vec![asset("ntm_1.4.1_linux_arm64.tar.gz")];
    let report = build_report(&assets, "linux", "amd64", Vec::new(), "https://r.test");
    let json = report.to_json().expect("must serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("must round trip");
    assert_eq!(value["platform"], "linux/amd64");
    assert!(value["convention"].is_string());
    assert!(value["tried_names"].is_array());
    assert_eq!(value["available_assets"][0]["match"], "close");
    assert_eq!(value["closest_match"]["name"], "ntm_1.4.1_linux_arm64.tar.gz");
    assert_eq!(value["release_url"], "https://r.test");
}

#[test]
fn strategy_labels_and_confidence_are_fixed() {
    let ladder = [
        (Strategy::ExactArchive, "exact_archive", 1.0),
        (Strategy::ExactBinary, "exact_binary", 0.9),
        (Strategy::PrefixMatch, "prefix_match", 0.7),
        (Strategy::FuzzySameOs, "fuzzy_same_os", 0.5),
        (Strategy::LegacyDash, "legacy_dash", 0.3),
    ];
    for (strategy, label, confidence) in ladder {
        assert_eq!(strategy.as_str(), label);
        assert_eq!(strategy.confidence(), confidence);
    }
    assert!(Strategy::ExactArchive.is_exact());
    assert!(Strategy::ExactBinary.is_exact());
    assert!(!Strategy::FuzzySameOs.is_exact());
}
