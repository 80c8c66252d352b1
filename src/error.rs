use crate::version::ParseError;
use thiserror::Error;

/// Errors raised by the version progression core.
///
/// I/O failures (artifact writes, git invocations) are not part of this
/// taxonomy; those travel as `anyhow::Error` with context attached at the
/// call site.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BumpError {
    /// The current version string does not match any recognized grammar.
    #[error("Invalid current version: {0}")]
    MalformedVersion(#[from] ParseError),

    /// The requested bump keyword is not one of nightly/beta/stable.
    #[error("Invalid bump type: {0}")]
    InvalidBumpType(String),

    /// Beta builds can only be cut from an existing beta or nightly line.
    #[error("Cannot bump to beta from stable.")]
    BetaFromStable,
}
