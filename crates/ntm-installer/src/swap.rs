use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::fs_utils::{remove_file_if_exists, set_executable};

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(suffix);
    path.with_file_name(name)
}

/// `P.new`: staged in the same directory as `P` so the rename stays on one
/// filesystem.
pub fn staging_path(installed: &Path) -> PathBuf {
    sibling_with_suffix(installed, ".new")
}

/// `P.old`: the retained backup. Post-install verification decides its fate.
pub fn backup_path(installed: &Path) -> PathBuf {
    sibling_with_suffix(installed, ".old")
}

/// Replace the installed binary with `new_binary` via the `.new`/`.old`
/// two-step. On success the backup is left in place for the post-install
/// verifier. The two-step also sidesteps host policies that refuse to
/// overwrite a running executable in place.
pub fn swap_binary(new_binary: &Path, installed: &Path) -> Result<()> {
    let staging = staging_path(installed);
    let backup = backup_path(installed);

    remove_file_if_exists(&staging)
        .with_context(|| format!("failed to clear stale staging file: {}", staging.display()))?;
    remove_file_if_exists(&backup)
        .with_context(|| format!("failed to clear stale backup file: {}", backup.display()))?;

    fs::copy(new_binary, &staging).with_context(|| {
        format!(
            "failed to stage new binary from {} to {}",
            new_binary.display(),
            staging.display()
        )
    })?;
    set_executable(&staging)
        .with_context(|| format!("failed to set executable mode on {}", staging.display()))?;

    let staged = fs::File::open(&staging)
        .with_context(|| format!("failed to reopen staged binary: {}", staging.display()))?;
    staged
        .sync_all()
        .with_context(|| format!("failed to fsync staged binary: {}", staging.display()))?;
    drop(staged);

    fs::rename(installed, &backup).with_context(|| {
        format!(
            "failed to move current binary aside: {} -> {}",
            installed.display(),
            backup.display()
        )
    })?;

    if let Err(swap_err) = fs::rename(&staging, installed) {
        return match fs::rename(&backup, installed) {
            Ok(()) => Err(swap_err).with_context(|| {
                format!(
                    "failed to move new binary into place at {} (previous binary restored)",
                    installed.display()
                )
            }),
            Err(restore_err) => Err(anyhow!(
                "failed to move new binary into place at {}: {swap_err}; additionally failed to \
                 restore the previous binary, it remains at {}: {restore_err}",
                installed.display(),
                backup.display()
            )),
        };
    }

    Ok(())
}
