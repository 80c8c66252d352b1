pub mod channel;

pub use channel::Channel;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A product release version.
///
/// The numeric triple is always present; the prerelease tag, when present, is
/// one of the two grammars the release pipeline recognizes (`beta.N` or
/// `nightly.YYYYMMDD`). Values are immutable; every bump produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<Prerelease>,
}

/// Prerelease tag of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerelease {
    /// `beta.N` where N is a positive increment.
    Beta(u64),
    /// `nightly.YYYYMMDD` where the date is the build date.
    Nightly(NaiveDate),
}

/// Failure to parse a version string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{input} ({reason})")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl Version {
    /// Create a stable version from its numeric triple.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a version string, accepting an optional leading `v`.
    ///
    /// The numeric triple must have exactly three non-negative integer parts.
    /// A `-beta.N` or `-nightly.YYYYMMDD` suffix is the only recognized
    /// prerelease grammar; anything else (including build metadata) is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let bare = input.trim().trim_start_matches('v');

        let parsed =
            semver::Version::parse(bare).map_err(|e| ParseError::new(input, e.to_string()))?;

        if !parsed.build.is_empty() {
            return Err(ParseError::new(input, "build metadata is not supported"));
        }

        let prerelease = if parsed.pre.is_empty() {
            None
        } else {
            Some(Prerelease::parse_tag(parsed.pre.as_str(), input)?)
        };

        Ok(Self {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease,
        })
    }

    /// The same numeric triple with no prerelease tag.
    pub fn as_stable(&self) -> Self {
        Self::new(self.major, self.minor, self.patch)
    }

    /// Release channel this version belongs to.
    pub fn channel(&self) -> Channel {
        Channel::of(self)
    }
}

impl Prerelease {
    fn parse_tag(tag: &str, input: &str) -> Result<Self, ParseError> {
        match tag.split_once('.') {
            Some(("beta", n)) => {
                let n: u64 = n
                    .parse()
                    .map_err(|_| ParseError::new(input, "beta increment must be an integer"))?;
                if n == 0 {
                    return Err(ParseError::new(input, "beta increment must be positive"));
                }
                Ok(Prerelease::Beta(n))
            }
            Some(("nightly", date)) => {
                if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::new(input, "nightly date must be YYYYMMDD"));
                }
                let date = NaiveDate::parse_from_str(date, "%Y%m%d")
                    .map_err(|_| ParseError::new(input, "nightly date is not a calendar date"))?;
                Ok(Prerelease::Nightly(date))
            }
            _ => Err(ParseError::new(input, "unrecognized prerelease tag")),
        }
    }

    /// Numeric component of the tag: the beta increment or the nightly date.
    pub fn number(&self) -> u64 {
        use chrono::Datelike;

        match self {
            Prerelease::Beta(n) => *n,
            Prerelease::Nightly(date) => {
                date.year() as u64 * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
            }
        }
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerelease::Beta(n) => write!(f, "beta.{}", n),
            Prerelease::Nightly(date) => write!(f, "nightly.{}", date.format("%Y%m%d")),
        }
    }
}
