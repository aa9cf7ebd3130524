use std::cmp::Ordering;

/// Versions are padded with zero components to at least this length before comparing.
const MIN_COMPONENTS: usize = 3;

/// Parse a dotted version into its numeric components.
///
/// Returns `None` when any component is empty or not a non-negative integer,
/// e.g. "1.2b" or "1..2".
pub fn normalize(version: &str) -> Option<Vec<u64>> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut components = trimmed
        .split('.')
        .map(|c| c.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if components.len() < MIN_COMPONENTS {
        components.resize(MIN_COMPONENTS, 0);
    }
    Some(components)
}

/// Compare two version strings numerically after padding both to equal length.
/// Returns `None` when either side is malformed.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let mut seg_a = normalize(a)?;
    let mut seg_b = normalize(b)?;

    let len = seg_a.len().max(seg_b.len());
    seg_a.resize(len, 0);
    seg_b.resize(len, 0);

    Some(seg_a.cmp(&seg_b))
}

/// True only when `candidate` is strictly newer than `current`.
/// An unavailable comparison counts as "not newer".
pub fn is_newer(current: &str, candidate: &str) -> bool {
    compare_versions(current, candidate) == Some(Ordering::Less)
}
