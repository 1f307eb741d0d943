mod archive;
mod asset_name;
mod compat;
mod platform;
mod version;

pub use archive::ArchiveKind;
pub use asset_name::{
    archive_ext, archive_name, binary_name, classify, legacy_archive_name, legacy_binary_name,
    parse_asset_name, AssetInfo, MatchQuality, TOOL_NAME,
};
pub use compat::compatible_archs;
pub use platform::{normalized_arch, PlatformTuple};
pub use version::{is_newer, normalize_version};
