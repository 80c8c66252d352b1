use super::{Updater, read_file_safe, write_file_atomic};
use crate::version::Version;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The JSON package manifest and its lockfile mirror.
///
/// Both files get their top-level `version` field replaced and are written
/// back pretty-printed.
pub struct ManifestUpdater {
    manifest: PathBuf,
    lockfile: PathBuf,
}

impl ManifestUpdater {
    pub fn new(manifest: impl Into<PathBuf>, lockfile: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            lockfile: lockfile.into(),
        }
    }

    fn set_version(path: &Path, version: &Version) -> Result<()> {
        let content = read_file_safe(path)?;
        let mut json: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;

        let obj = json
            .as_object_mut()
            .with_context(|| format!("{} is not a JSON object", path.display()))?;
        obj.insert("version".to_string(), Value::String(version.to_string()));

        write_file_atomic(path, &serde_json::to_string_pretty(&json)?)
    }
}

#[async_trait]
impl Updater for ManifestUpdater {
    async fn apply(&self, root: &Path, version: &Version) -> Result<()> {
        for path in [&self.manifest, &self.lockfile] {
            Self::set_version(&root.join(path), version)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
