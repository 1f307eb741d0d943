mod digest;
mod download;
mod extract;
mod fs_utils;
mod swap;
mod verify;

pub use digest::{sha256_hex_file, verify_checksum, ChecksumStatus};
pub use download::{download_asset, download_client, DownloadProgress, SilentProgress};
pub use extract::{expected_binary_name, extract_binary};
pub use swap::{backup_path, staging_path, swap_binary};
pub use verify::{discard_backup, rollback, verify_installed, VerifyOutcome};
