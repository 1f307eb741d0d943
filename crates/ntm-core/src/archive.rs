#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    Zip,
}

// Suffix dispatch table; new formats slot in here without touching the
// resolver.
const SUFFIX_TABLE: &[(&str, ArchiveKind)] = &[
    (".tar.gz", ArchiveKind::TarGz),
    (".tgz", ArchiveKind::TarGz),
    (".zip", ArchiveKind::Zip),
];

impl ArchiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }

    pub fn from_asset_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        SUFFIX_TABLE
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|(_, kind)| *kind)
    }
}
