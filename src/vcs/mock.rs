//! Mock collaborator for testing bump flows without a git checkout.

use super::Vcs;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;

/// An in-memory `Vcs` that serves pre-configured tags and branch state and
/// records the commits it is asked to make.
pub struct MockVcs {
    tags: Vec<String>,
    branch: String,
    last_major: Option<u64>,
    commits: Mutex<Vec<String>>,
}

impl MockVcs {
    /// Create a mock positioned on the given branch.
    pub fn new(branch: &str) -> Self {
        Self {
            tags: Vec::new(),
            branch: branch.to_string(),
            last_major: None,
            commits: Mutex::new(Vec::new()),
        }
    }

    /// Add existing tags.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Set the last major version released on the mainline.
    pub fn with_last_major(mut self, major: u64) -> Self {
        self.last_major = Some(major);
        self
    }

    /// Messages of the commits made through this mock, in order.
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        // Honors the prefix part of a trailing-`*` glob, which is the only
        // shape of pattern the bump flow uses.
        let prefix = pattern.trim_end_matches('*');
        Ok(self
            .tags
            .iter()
            .filter(|tag| tag.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    async fn commit_all(&self, message: &str) -> Result<()> {
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn last_release_major(&self) -> Result<u64> {
        self.last_major
            .ok_or_else(|| anyhow!("No stable release tag found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_filters_tags_by_pattern() {
        let vcs = MockVcs::new("work").with_tags(&["v2.0.0-beta.1", "v2.0.1-beta.1", "v3.0.0"]);

        let tags = vcs.list_tags("v2.0.0-beta.*").await.unwrap();
        assert_eq!(tags, vec!["v2.0.0-beta.1"]);

        let all = vcs.list_tags("v*").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_mock_branch_and_commits() {
        let vcs = MockVcs::new("release-2.0");
        assert_eq!(vcs.current_branch().await.unwrap(), "release-2.0");

        vcs.commit_all("Bump v2.0.1").await.unwrap();
        assert_eq!(vcs.commits(), vec!["Bump v2.0.1"]);
    }

    #[tokio::test]
    async fn test_mock_last_major_errors_when_unset() {
        let vcs = MockVcs::new("main");
        assert!(vcs.last_release_major().await.is_err());

        let vcs = MockVcs::new("main").with_last_major(11);
        assert_eq!(vcs.last_release_major().await.unwrap(), 11);
    }
}
