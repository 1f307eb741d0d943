use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use ntm_core::{is_newer, normalize_version, ArchiveKind, PlatformTuple};
use ntm_installer::{
    backup_path, discard_backup, download_asset, download_client, expected_binary_name,
    extract_binary, rollback, swap_binary, verify_checksum, verify_installed, ChecksumStatus,
    VerifyOutcome,
};
use ntm_release::{CatalogClient, UpstreamProfile};
use ntm_resolver::{build_report, resolve};

use crate::render::{current_output_style, render_status_line, DownloadBar, OutputStyle, Status};

const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Only report whether a newer release exists
    #[arg(long)]
    pub check: bool,
    /// Skip the confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Reinstall even when already on the latest version
    #[arg(long, short = 'f')]
    pub force: bool,
    /// Accept only canonically named assets, no fallbacks
    #[arg(long)]
    pub strict: bool,
    /// Explain how the release asset was chosen
    #[arg(long, short = 'v')]
    pub verbose: bool,
    /// Emit the no-match diagnostic as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: UpgradeArgs) -> Result<()> {
    let style = current_output_style();
    let current = normalize_version(env!("CARGO_PKG_VERSION"));
    let platform = PlatformTuple::host(current.as_str());

    let profile = UpstreamProfile::load()?;
    let catalog = CatalogClient::new(profile)?;
    let Some(release) = catalog.fetch_latest()? else {
        status(style, Status::Ok, "no releases published yet");
        return Ok(());
    };

    let latest = normalize_version(&release.tag_name);
    let newer = is_newer(&current, &latest);

    if args.check {
        if newer {
            status(
                style,
                Status::Warn,
                &format!("update available: v{current} -> v{latest}"),
            );
            println!("release notes: {}", release.html_url);
        } else {
            status(style, Status::Ok, &format!("already up to date (v{current})"));
        }
        return Ok(());
    }

    if !newer && !args.force {
        status(style, Status::Ok, &format!("already up to date (v{current})"));
        return Ok(());
    }

    let (matched, tried) = resolve(
        &release.assets,
        &platform.os,
        &platform.arch,
        &latest,
        args.strict,
    );
    let Some(matched) = matched else {
        let report = build_report(
            &release.assets,
            &platform.os,
            &platform.arch,
            tried,
            &catalog.profile().releases_url,
        );
        if args.json {
            eprintln!("{}", report.to_json()?);
        } else {
            for line in report.render_human(&catalog.profile().issues_url) {
                eprintln!("{line}");
            }
        }
        bail!(
            "no compatible release asset for {}/{}",
            platform.os,
            platform.arch
        );
    };

    if args.verbose {
        for name in &tried {
            println!("probed {name}");
        }
    }
    if args.verbose || !matched.strategy.is_exact() {
        let kind = if matched.strategy.is_exact() {
            Status::Ok
        } else {
            Status::Warn
        };
        status(
            style,
            kind,
            &format!(
                "selected {} via {} (confidence {:.1}): {}",
                matched.asset.name,
                matched.strategy.as_str(),
                matched.confidence,
                matched.reason
            ),
        );
    }

    if !args.yes && !confirm(&format!("upgrade ntm v{current} -> v{latest}?"))? {
        status(style, Status::Ok, "upgrade cancelled");
        return Ok(());
    }

    // Unreachable manifests downgrade to a warning; a present manifest that
    // disagrees with the download stays fatal in verify_checksum.
    let manifest = match catalog.fetch_checksums(&release) {
        Ok(manifest) => manifest,
        Err(err) => {
            status(
                style,
                Status::Warn,
                &format!("checksum manifest unavailable: {err:#}"),
            );
            None
        }
    };

    let staging = tempfile::tempdir().context("failed to create staging directory")?;
    let client = download_client(&catalog.profile().user_agent)?;
    let mut bar = DownloadBar::new(style);
    status(style, Status::Ok, &format!("downloading {}", matched.asset.name));
    let downloaded = download_asset(&client, matched.asset, staging.path(), &mut bar)?;

    match verify_checksum(&downloaded, &matched.asset.name, manifest.as_ref())? {
        ChecksumStatus::Verified => {
            if args.verbose {
                status(style, Status::Ok, "checksum verified");
            }
        }
        ChecksumStatus::Unverified(reason) => {
            status(style, Status::Warn, &format!("checksum not verified: {reason}"));
        }
    }

    let bin_name = expected_binary_name(&platform.os);
    let new_binary = match ArchiveKind::from_asset_name(&matched.asset.name) {
        Some(kind) => extract_binary(&downloaded, kind, staging.path(), bin_name)?,
        // A bare binary asset; the swap sets its executable mode.
        None => downloaded.clone(),
    };

    let installed = std::env::current_exe().context("failed to locate the running binary")?;
    let installed = installed
        .canonicalize()
        .with_context(|| format!("failed to canonicalize {}", installed.display()))?;

    swap_binary(&new_binary, &installed)?;

    match verify_installed(&installed, &latest, VERIFY_TIMEOUT) {
        Ok(VerifyOutcome::Verified) => {
            discard_backup(&installed)?;
            status(style, Status::Ok, &format!("upgraded to v{latest}"));
            Ok(())
        }
        Ok(VerifyOutcome::Mismatch { reported }) => {
            status(
                style,
                Status::Err,
                &format!("installed binary reports '{reported}', expected v{latest}"),
            );
            offer_rollback(style, &installed, args.yes)
        }
        Err(err) => {
            status(
                style,
                Status::Err,
                &format!("post-install verification failed: {err:#}"),
            );
            offer_rollback(style, &installed, args.yes)
        }
    }
}

fn offer_rollback(style: OutputStyle, installed: &Path, assume_yes: bool) -> Result<()> {
    // Unreadable stdin counts as yes; restoring is the safe default.
    let restore = assume_yes || confirm("restore the previous binary?").unwrap_or(true);
    if restore {
        rollback(installed)?;
        status(style, Status::Warn, "previous binary restored");
        bail!("upgrade rolled back after failed verification");
    }
    status(
        style,
        Status::Warn,
        &format!(
            "new binary kept; backup retained at {}",
            backup_path(installed).display()
        ),
    );
    bail!("upgrade finished but the installed binary failed verification");
}

/// Empty input means yes.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [Y/n] ");
    io::stdout().flush().context("failed to flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

fn status(style: OutputStyle, kind: Status, message: &str) {
    let line = render_status_line(style, kind, message);
    match kind {
        Status::Ok => println!("{line}"),
        Status::Warn | Status::Err => eprintln!("{line}"),
    }
}
