use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use ntm_core::normalize_version;

use crate::fs_utils::remove_file_if_exists;
use crate::swap::backup_path;

const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    /// The probe ran but did not report the expected version.
    Mismatch { reported: String },
}

/// Run `<installed> version --short` with a bounded deadline and check the
/// reported version against the expected one. Passes when the child exits 0
/// and the trimmed output normalizes to the expected version, or contains
/// it as a substring.
pub fn verify_installed(
    installed: &Path,
    expected_version: &str,
    timeout: Duration,
) -> Result<VerifyOutcome> {
    let mut child = Command::new(installed)
        .args(["version", "--short"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to run {} version --short", installed.display()))?;

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait().with_context(|| {
            format!("failed to wait for {} version --short", installed.display())
        })? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(anyhow!(
                    "verification probe timed out after {:?}: {} version --short",
                    timeout,
                    installed.display()
                ));
            }
            None => std::thread::sleep(PROBE_POLL_INTERVAL),
        }
    };

    let mut stdout = String::new();
    if let Some(mut pipe) = child.stdout.take() {
        pipe.read_to_string(&mut stdout)
            .with_context(|| format!("failed to read probe output of {}", installed.display()))?;
    }
    let reported = stdout.trim().to_string();

    if !status.success() {
        return Ok(VerifyOutcome::Mismatch {
            reported: if reported.is_empty() {
                format!("probe exited with {status}")
            } else {
                reported
            },
        });
    }

    let expected = normalize_version(expected_version);
    if normalize_version(&reported) == expected || reported.contains(&expected) {
        return Ok(VerifyOutcome::Verified);
    }
    Ok(VerifyOutcome::Mismatch { reported })
}

/// Put the backup back in place of a binary that failed verification.
pub fn rollback(installed: &Path) -> Result<()> {
    let backup = backup_path(installed);
    remove_file_if_exists(installed)
        .with_context(|| format!("failed to remove unverified binary: {}", installed.display()))?;
    fs::rename(&backup, installed).with_context(|| {
        format!(
            "failed to restore previous binary from {}",
            backup.display()
        )
    })
}

/// Drop the backup after a successful verification.
pub fn discard_backup(installed: &Path) -> Result<()> {
    let backup = backup_path(installed);
    remove_file_if_exists(&backup)
        .with_context(|| format!("failed to remove backup: {}", backup.display()))
}
