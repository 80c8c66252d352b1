use super::{Updater, join_lines, read_file_safe, write_file_atomic};
use crate::version::Version;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The Windows resource script.
///
/// Rewrites the `FILEVERSION` line and the `PRODUCTVERSION` line directly
/// below it. The fourth component of the quad carries the numeric prerelease
/// component (beta increment or nightly date), 0 for stable releases.
pub struct WinRcUpdater {
    path: PathBuf,
}

impl WinRcUpdater {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn version_quad(version: &Version) -> String {
        let build = version.prerelease.map_or(0, |pre| pre.number());
        format!(
            "{},{},{},{}",
            version.major, version.minor, version.patch, build
        )
    }
}

#[async_trait]
impl Updater for WinRcUpdater {
    async fn apply(&self, root: &Path, version: &Version) -> Result<()> {
        let path = root.join(&self.path);
        let content = read_file_safe(&path)?;

        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        let idx = lines
            .iter()
            .position(|line| line.contains("FILEVERSION"))
            .with_context(|| format!("{}: no FILEVERSION line found", path.display()))?;

        if idx + 1 >= lines.len() || !lines[idx + 1].contains("PRODUCTVERSION") {
            bail!(
                "{}: expected PRODUCTVERSION directly below FILEVERSION",
                path.display()
            );
        }

        let quad = Self::version_quad(version);
        lines[idx] = format!(" FILEVERSION {}", quad);
        lines[idx + 1] = format!(" PRODUCTVERSION {}", quad);

        write_file_atomic(&path, &join_lines(&lines, &content))
    }

    fn name(&self) -> &'static str {
        "resource script"
    }
}
