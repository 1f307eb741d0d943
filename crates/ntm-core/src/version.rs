/// Strip a single leading `v` and truncate at the first `-` or `+`.
///
/// Pre-release and build suffixes are intentionally dropped, so
/// `1.0.0-beta` compares equal to `1.0.0`.
pub fn normalize_version(version: &str) -> String {
    let bare = version.strip_prefix('v').unwrap_or(version);
    let end = bare.find(['-', '+']).unwrap_or(bare.len());
    bare[..end].to_string()
}

/// Whether `latest` is strictly newer than `current`.
///
/// The empty string and the literal `dev` sort below every real version.
/// Components are compared numerically; there is no lexicographic fallback.
pub fn is_newer(current: &str, latest: &str) -> bool {
    let current = normalize_version(current);
    let latest = normalize_version(latest);

    if !is_real_version(&latest) {
        return false;
    }
    if !is_real_version(&current) {
        return true;
    }

    let current = numeric_components(&current);
    let latest = numeric_components(&latest);
    let width = current.len().max(latest.len());
    for i in 0..width {
        let a = current.get(i).copied().unwrap_or(0);
        let b = latest.get(i).copied().unwrap_or(0);
        if b != a {
            return b > a;
        }
    }
    false
}

fn is_real_version(normalized: &str) -> bool {
    !normalized.is_empty() && normalized != "dev"
}

fn numeric_components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}
