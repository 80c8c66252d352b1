use super::Vcs;
use crate::version::Version;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Collaborator backed by the `git` CLI, run from the repository root.
pub struct GitVcs {
    root: PathBuf,
}

impl GitVcs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Vcs for GitVcs {
    async fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let out = self.git(&["tag", "--list", pattern]).await?;
        Ok(out
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(out.trim().to_string())
    }

    async fn commit_all(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-a", "-m", message, "-n"]).await?;
        Ok(())
    }

    async fn last_release_major(&self) -> Result<u64> {
        // The release history lives in the stable tag namespace; prerelease
        // tags never advance the major line.
        let tags = self.list_tags("v*").await?;
        tags.iter()
            .filter_map(|tag| Version::parse(tag).ok())
            .filter(|v| v.prerelease.is_none())
            .map(|v| v.major)
            .max()
            .context("No stable release tag found to derive the last released major from")
    }
}
