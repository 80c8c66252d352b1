mod git;
#[cfg(test)]
pub mod mock;

pub use git::GitVcs;
#[cfg(test)]
pub use mock::MockVcs;

use anyhow::Result;
use async_trait::async_trait;

/// Version-control operations the bump flow depends on.
///
/// The progression engine itself never touches the repository; it receives
/// plain data gathered through this trait, which keeps the rules testable
/// against an in-process mock.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// List tags matching a glob pattern.
    async fn list_tags(&self, pattern: &str) -> Result<Vec<String>>;

    /// Short name of the currently checked-out branch.
    async fn current_branch(&self) -> Result<String>;

    /// Commit all tracked changes with the given message.
    async fn commit_all(&self, message: &str) -> Result<()>;

    /// Highest major version ever cut as a stable release.
    async fn last_release_major(&self) -> Result<u64>;
}
