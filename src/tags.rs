//! Beta tag lookup: which beta increments already exist for a release triple.
//!
//! Tags are matched against the `v<major>.<minor>.<patch>-beta.*` namespace and
//! ordered by their numeric increment. Lexicographic ordering would put
//! `beta.10` before `beta.2`, so everything here sorts parsed integers.

use crate::version::{Prerelease, Version};

/// Glob pattern selecting the beta tags for a version's numeric triple.
pub fn beta_tag_pattern(version: &Version) -> String {
    format!(
        "v{}.{}.{}-beta.*",
        version.major, version.minor, version.patch
    )
}

/// Extract the beta increments present in `tags` for `base`'s numeric triple,
/// sorted ascending. Tags that don't parse or belong to another triple are
/// ignored.
pub fn beta_increments(tags: &[String], base: &Version) -> Vec<u64> {
    let mut increments: Vec<u64> = tags
        .iter()
        .filter_map(|tag| Version::parse(tag).ok())
        .filter(|v| (v.major, v.minor, v.patch) == (base.major, base.minor, base.patch))
        .filter_map(|v| match v.prerelease {
            Some(Prerelease::Beta(n)) => Some(n),
            _ => None,
        })
        .collect();
    increments.sort_unstable();
    increments
}

/// Next beta increment: one past the highest existing, or 1 when none exist.
pub fn next_beta_increment(increments: &[u64]) -> u64 {
    increments.last().map_or(1, |max| max + 1)
}
