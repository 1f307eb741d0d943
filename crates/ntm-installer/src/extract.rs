use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use ntm_core::ArchiveKind;

use crate::fs_utils::set_executable;

pub fn expected_binary_name(os: &str) -> &'static str {
    if os == "windows" {
        "ntm.exe"
    } else {
        "ntm"
    }
}

/// Unpack the archive into `dest_dir` and return the path of the embedded
/// binary whose base name is `bin_name`. Entries that would escape the
/// extraction root are rejected outright.
pub fn extract_binary(
    archive_path: &Path,
    kind: ArchiveKind,
    dest_dir: &Path,
    bin_name: &str,
) -> Result<PathBuf> {
    let found = match kind {
        ArchiveKind::TarGz => extract_tar_gz(archive_path, dest_dir, bin_name)?,
        ArchiveKind::Zip => extract_zip(archive_path, dest_dir, bin_name)?,
    };

    let Some(binary) = found else {
        return Err(anyhow!(
            "expected binary '{bin_name}' not found in {}",
            archive_path.display()
        ));
    };
    set_executable(&binary)
        .with_context(|| format!("failed to set executable mode on {}", binary.display()))?;
    Ok(binary)
}

fn extract_tar_gz(archive_path: &Path, dest_dir: &Path, bin_name: &str) -> Result<Option<PathBuf>> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut found = None;
    for entry in archive
        .entries()
        .with_context(|| format!("failed to read tar archive: {}", archive_path.display()))?
    {
        let mut entry = entry
            .with_context(|| format!("malformed tar entry in {}", archive_path.display()))?;

        let entry_type = entry.header().entry_type();
        if !entry_type.is_file() && !entry_type.is_dir() {
            continue;
        }

        let rel = entry
            .path()
            .with_context(|| format!("unreadable entry path in {}", archive_path.display()))?
            .into_owned();
        let target = safe_join(dest_dir, &rel)?;

        if entry_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(&target)
            .with_context(|| format!("failed to create {}", target.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", target.display()))?;

        if target.file_name().and_then(|n| n.to_str()) == Some(bin_name) {
            found = Some(target);
        }
    }

    Ok(found)
}

fn extract_zip(archive_path: &Path, dest_dir: &Path, bin_name: &str) -> Result<Option<PathBuf>> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("failed to read zip archive: {}", archive_path.display()))?;

    let mut found = None;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("malformed zip entry in {}", archive_path.display()))?;

        let Some(rel) = entry.enclosed_name() else {
            return Err(anyhow!(
                "archive entry escapes the extraction root: {}",
                entry.name()
            ));
        };
        let target = safe_join(dest_dir, &rel)?;

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(&target)
            .with_context(|| format!("failed to create {}", target.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", target.display()))?;

        if target.file_name().and_then(|n| n.to_str()) == Some(bin_name) {
            found = Some(target);
        }
    }

    Ok(found)
}

/// Join an archive-relative path onto the extraction root, refusing parent
/// traversal and absolute components (zip-slip).
pub(crate) fn safe_join(root: &Path, rel: &Path) -> Result<PathBuf> {
    let mut out = root.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => {
                return Err(anyhow!(
                    "archive entry escapes the extraction root: {}",
                    rel.display()
                ));
            }
        }
    }
    Ok(out)
}
