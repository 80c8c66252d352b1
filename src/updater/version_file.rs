use super::{Updater, write_file_atomic};
use crate::version::Version;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The plain-text version record: the file holds exactly the version string.
pub struct VersionFileUpdater {
    path: PathBuf,
}

impl VersionFileUpdater {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Updater for VersionFileUpdater {
    async fn apply(&self, root: &Path, version: &Version) -> Result<()> {
        write_file_atomic(&root.join(&self.path), &version.to_string())
    }

    fn name(&self) -> &'static str {
        "version file"
    }
}
