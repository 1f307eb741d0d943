#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTuple {
    pub os: String,
    pub arch: String,
    pub version: String,
}

impl PlatformTuple {
    pub fn new(os: impl Into<String>, arch: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            version: version.into(),
        }
    }

    /// The local machine, using the OS/arch labels the release pipeline
    /// publishes under.
    pub fn host(version: impl Into<String>) -> Self {
        Self::new(
            release_os(std::env::consts::OS),
            release_arch(std::env::consts::ARCH),
            version,
        )
    }
}

fn release_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn release_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

/// The arch form used in asset filenames: darwin ships a universal binary
/// under the sentinel `all`, and 32-bit ARM is published as `armv7`.
pub fn normalized_arch(os: &str, arch: &str) -> String {
    if os == "darwin" {
        return "all".to_string();
    }
    if arch == "arm" {
        return "armv7".to_string();
    }
    arch.to_string()
}
