/// Candidate archs an asset may carry and still run on the requested
/// platform, in preference order. The second element feeds the match
/// reason, e.g. "same OS, amd64 via Rosetta 2".
pub fn compatible_archs(os: &str, arch: &str) -> Vec<(String, String)> {
    match (os, arch) {
        ("darwin", "arm64") => vec![
            ("all".to_string(), "universal binary".to_string()),
            ("arm64".to_string(), "native arm64 build".to_string()),
            ("amd64".to_string(), "amd64 via Rosetta 2".to_string()),
        ],
        ("darwin", "amd64") => vec![
            ("all".to_string(), "universal binary".to_string()),
            ("amd64".to_string(), "native amd64 build".to_string()),
        ],
        (_, "arm") => vec![
            ("armv7".to_string(), "armv7 build".to_string()),
            ("arm".to_string(), "arm build".to_string()),
        ],
        _ => vec![(arch.to_string(), format!("native {arch} build"))],
    }
}
