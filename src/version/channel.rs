use super::{Prerelease, Version};
use std::fmt;

/// Release maturity of a version.
///
/// Never stored alongside a version; always derived from the prerelease tag,
/// so the two can't drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stable,
    Beta,
    Nightly,
}

impl Channel {
    /// Classify a version by its prerelease tag.
    pub fn of(version: &Version) -> Self {
        match version.prerelease {
            None => Channel::Stable,
            Some(Prerelease::Beta(_)) => Channel::Beta,
            Some(Prerelease::Nightly(_)) => Channel::Nightly,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
            Channel::Nightly => "nightly",
        };
        f.write_str(name)
    }
}
