mod catalog;
mod checksums;
mod profile;

pub use catalog::{CatalogClient, ReleaseAsset, ReleaseDescriptor};
pub use checksums::ChecksumManifest;
pub use profile::UpstreamProfile;
