mod manifest;
mod plist;
mod version_file;
mod version_h;
mod win_rc;

pub use manifest::ManifestUpdater;
pub use plist::PlistUpdater;
pub use version_file::VersionFileUpdater;
pub use version_h::VersionHeaderUpdater;
pub use win_rc::WinRcUpdater;

use crate::config::BumpConfig;
use crate::version::Version;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::fs;
use std::path::Path;

/// A release artifact that mirrors the product version.
///
/// Each updater owns a distinct file, so the whole set can be applied
/// concurrently without coordination.
#[async_trait]
pub trait Updater: Send + Sync {
    /// Rewrite the artifact under `root` to carry `version`.
    async fn apply(&self, root: &Path, version: &Version) -> Result<()>;

    /// Artifact name for progress output and error context.
    fn name(&self) -> &'static str;
}

/// The full artifact set for a configuration.
pub fn updaters_for(config: &BumpConfig) -> Vec<Box<dyn Updater>> {
    vec![
        Box::new(VersionFileUpdater::new(&config.paths.version_file)),
        Box::new(ManifestUpdater::new(
            &config.paths.manifest,
            &config.paths.lockfile,
        )),
        Box::new(PlistUpdater::new(&config.paths.plist)),
        Box::new(VersionHeaderUpdater::new(
            &config.paths.header,
            &config.header_prefix,
        )),
        Box::new(WinRcUpdater::new(&config.paths.rc)),
    ]
}

/// Rewrite every artifact concurrently. The first failure aborts the fan-out;
/// artifacts that were already written stay written.
pub async fn apply_all(
    updaters: &[Box<dyn Updater>],
    root: &Path,
    version: &Version,
) -> Result<()> {
    try_join_all(updaters.iter().map(|updater| async move {
        updater
            .apply(root, version)
            .await
            .with_context(|| format!("Failed to update {}", updater.name()))
    }))
    .await?;
    Ok(())
}

/// Read a file as UTF-8 with path context attached.
pub(crate) fn read_file_safe(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write through a sibling temp file and rename, so a failed write can't
/// leave a half-written artifact behind.
pub(crate) fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("artifact");
    let tmp = path.with_file_name(format!("{}.tmp", file_name));

    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Re-join rewritten lines, keeping the original file's trailing newline.
pub(crate) fn join_lines(lines: &[String], original: &str) -> String {
    let mut out = lines.join("\n");
    if original.ends_with('\n') {
        out.push('\n');
    }
    out
}
