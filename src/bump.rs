//! Version progression: the channel-transition state machine.
//!
//! `next_version` is a pure function over the current version, the requested
//! bump, and a snapshot of everything the rules depend on (build date, branch,
//! existing beta increments, last released major). `next_with_vcs` is the thin
//! orchestrator that gathers that snapshot from the version-control
//! collaborator, querying only what the requested transition actually needs.

use crate::error::BumpError;
use crate::tags;
use crate::vcs::Vcs;
use crate::version::{Channel, Prerelease, Version};
use anyhow::Result;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Nightly,
    Beta,
    Stable,
}

impl FromStr for BumpKind {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nightly" => Ok(BumpKind::Nightly),
            "beta" => Ok(BumpKind::Beta),
            "stable" => Ok(BumpKind::Stable),
            other => Err(BumpError::InvalidBumpType(other.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Nightly => "nightly",
            BumpKind::Beta => "beta",
            BumpKind::Stable => "stable",
        };
        f.write_str(name)
    }
}

/// Snapshot of the state the progression rules read.
#[derive(Debug, Clone)]
pub struct BumpInputs<'a> {
    /// Build date stamped into nightly versions.
    pub today: NaiveDate,
    /// Branch the bump runs on.
    pub branch: &'a str,
    /// Designated mainline branch name.
    pub mainline: &'a str,
    /// Existing beta increments for the current numeric triple.
    pub beta_increments: &'a [u64],
    /// Last major ever released, populated when `branch` is the mainline.
    pub last_mainline_major: Option<u64>,
}

/// Apply the state machine and produce the next version.
pub fn next_version(
    current: &Version,
    kind: BumpKind,
    inputs: &BumpInputs<'_>,
) -> Result<Version, BumpError> {
    let channel = current.channel();

    match kind {
        BumpKind::Nightly => {
            let mut next = match channel {
                Channel::Stable => Version::new(current.major, current.minor, current.patch + 1),
                Channel::Beta | Channel::Nightly => current.as_stable(),
            };

            // Mainline nightlies track the next major release rather than the
            // current patch line.
            if inputs.branch == inputs.mainline
                && let Some(last) = inputs.last_mainline_major
            {
                next = Version::new(last + 1, 0, 0);
            }

            next.prerelease = Some(Prerelease::Nightly(inputs.today));
            Ok(next)
        }
        BumpKind::Beta => match channel {
            Channel::Stable => Err(BumpError::BetaFromStable),
            Channel::Beta | Channel::Nightly => {
                let mut next = current.as_stable();
                next.prerelease = Some(Prerelease::Beta(tags::next_beta_increment(
                    inputs.beta_increments,
                )));
                Ok(next)
            }
        },
        BumpKind::Stable => match channel {
            Channel::Stable => Ok(Version::new(
                current.major,
                current.minor,
                current.patch + 1,
            )),
            Channel::Beta | Channel::Nightly => Ok(current.as_stable()),
        },
    }
}

/// Gather the engine's inputs from the collaborator and run the state machine.
///
/// Tag listing happens only for beta bumps; the release-history lookup only
/// for nightly bumps on the mainline branch.
pub async fn next_with_vcs(
    current: &Version,
    kind: BumpKind,
    vcs: &dyn Vcs,
    mainline: &str,
    today: NaiveDate,
) -> Result<Version> {
    let branch = vcs.current_branch().await?;

    let beta_increments = if kind == BumpKind::Beta {
        let listed = vcs.list_tags(&tags::beta_tag_pattern(current)).await?;
        tags::beta_increments(&listed, current)
    } else {
        Vec::new()
    };

    let last_mainline_major = if kind == BumpKind::Nightly && branch == mainline {
        Some(vcs.last_release_major().await?)
    } else {
        None
    };

    let inputs = BumpInputs {
        today,
        branch: &branch,
        mainline,
        beta_increments: &beta_increments,
        last_mainline_major,
    };

    Ok(next_version(current, kind, &inputs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::MockVcs;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(1995, 9, 1).unwrap()
    }

    fn inputs<'a>(branch: &'a str, increments: &'a [u64]) -> BumpInputs<'a> {
        BumpInputs {
            today: today(),
            branch,
            mainline: "main",
            beta_increments: increments,
            last_mainline_major: None,
        }
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_nightly_from_stable_bumps_patch() {
        let next = next_version(&v("v2.0.0"), BumpKind::Nightly, &inputs("work", &[])).unwrap();
        assert_eq!(next.to_string(), "2.0.1-nightly.19950901");
    }

    #[test]
    fn test_nightly_from_beta_keeps_triple() {
        let next =
            next_version(&v("v2.0.0-beta.1"), BumpKind::Nightly, &inputs("work", &[])).unwrap();
        assert_eq!(next.to_string(), "2.0.0-nightly.19950901");
    }

    #[test]
    fn test_nightly_from_nightly_refreshes_date() {
        let next = next_version(
            &v("v2.0.0-nightly.19940101"),
            BumpKind::Nightly,
            &inputs("work", &[]),
        )
        .unwrap();
        assert_eq!(next.to_string(), "2.0.0-nightly.19950901");
    }

    #[test]
    fn test_nightly_on_mainline_tracks_next_major() {
        let mut i = inputs("main", &[]);
        i.last_mainline_major = Some(11);
        let next = next_version(&v("v2.0.0"), BumpKind::Nightly, &i).unwrap();
        assert_eq!(next.to_string(), "12.0.0-nightly.19950901");
    }

    #[test]
    fn test_nightly_off_mainline_ignores_release_history() {
        let mut i = inputs("release-2.0", &[]);
        i.last_mainline_major = Some(11);
        let next = next_version(&v("v2.0.0"), BumpKind::Nightly, &i).unwrap();
        assert_eq!(next.to_string(), "2.0.1-nightly.19950901");
    }

    #[test]
    fn test_beta_from_stable_is_rejected() {
        let err = next_version(&v("v2.0.0"), BumpKind::Beta, &inputs("work", &[])).unwrap_err();
        assert_eq!(err, BumpError::BetaFromStable);
        assert_eq!(err.to_string(), "Cannot bump to beta from stable.");
    }

    #[test]
    fn test_first_beta_when_no_tags_exist() {
        let next = next_version(
            &v("v2.0.0-nightly.19950901"),
            BumpKind::Beta,
            &inputs("work", &[]),
        )
        .unwrap();
        assert_eq!(next.to_string(), "2.0.0-beta.1");
    }

    #[test]
    fn test_beta_increments_past_the_highest_existing() {
        let next = next_version(
            &v("v2.0.0-beta.1"),
            BumpKind::Beta,
            &inputs("work", &[2, 9, 10]),
        )
        .unwrap();
        assert_eq!(next.to_string(), "2.0.0-beta.11");
    }

    #[test]
    fn test_stable_from_stable_bumps_patch() {
        let next = next_version(&v("v2.0.0"), BumpKind::Stable, &inputs("work", &[])).unwrap();
        assert_eq!(next.to_string(), "2.0.1");
    }

    #[test]
    fn test_stable_from_beta_promotes() {
        let next =
            next_version(&v("v2.0.0-beta.1"), BumpKind::Stable, &inputs("work", &[])).unwrap();
        assert_eq!(next.to_string(), "2.0.0");
    }

    #[test]
    fn test_stable_from_nightly_promotes() {
        let next = next_version(
            &v("v2.0.0-nightly.19950901"),
            BumpKind::Stable,
            &inputs("work", &[]),
        )
        .unwrap();
        assert_eq!(next.to_string(), "2.0.0");
    }

    #[test]
    fn test_bump_kind_from_str() {
        assert_eq!("nightly".parse::<BumpKind>().unwrap(), BumpKind::Nightly);
        assert_eq!("beta".parse::<BumpKind>().unwrap(), BumpKind::Beta);
        assert_eq!("stable".parse::<BumpKind>().unwrap(), BumpKind::Stable);

        let err = "patch".parse::<BumpKind>().unwrap_err();
        assert_eq!(err, BumpError::InvalidBumpType("patch".to_string()));
        assert_eq!(err.to_string(), "Invalid bump type: patch");
    }

    #[tokio::test]
    async fn test_next_with_vcs_reads_beta_tags() {
        let vcs = MockVcs::new("release-2.0").with_tags(&[
            "v2.0.0-beta.2",
            "v2.0.0-beta.10",
            "v2.0.1-beta.1",
        ]);

        let next = next_with_vcs(&v("v2.0.0-beta.2"), BumpKind::Beta, &vcs, "main", today())
            .await
            .unwrap();
        assert_eq!(next.to_string(), "2.0.0-beta.11");
    }

    #[tokio::test]
    async fn test_next_with_vcs_mainline_nightly() {
        let vcs = MockVcs::new("main").with_last_major(11);

        let next = next_with_vcs(&v("v2.0.0"), BumpKind::Nightly, &vcs, "main", today())
            .await
            .unwrap();
        assert_eq!(next.to_string(), "12.0.0-nightly.19950901");
    }

    #[tokio::test]
    async fn test_next_with_vcs_branch_nightly_skips_release_history() {
        // No last major configured: the lookup would fail if it were made.
        let vcs = MockVcs::new("release-2.0");

        let next = next_with_vcs(&v("v2.0.0"), BumpKind::Nightly, &vcs, "main", today())
            .await
            .unwrap();
        assert_eq!(next.to_string(), "2.0.1-nightly.19950901");
    }

    #[tokio::test]
    async fn test_next_with_vcs_stable_needs_no_lookups() {
        let vcs = MockVcs::new("release-2.0");

        let next = next_with_vcs(&v("v2.0.0-beta.4"), BumpKind::Stable, &vcs, "main", today())
            .await
            .unwrap();
        assert_eq!(next.to_string(), "2.0.0");
    }
}
