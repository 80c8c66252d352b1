use super::{Updater, join_lines, read_file_safe, write_file_atomic};
use crate::version::Version;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The C version header.
///
/// The file carries `#define <PREFIX>_{MAJOR,MINOR,PATCH}_VERSION` on three
/// consecutive lines, then one spacer line, then the prerelease define. The
/// rewrite anchors on the major-version line and replaces the block at those
/// fixed offsets; the prerelease define is commented out for stable releases.
pub struct VersionHeaderUpdater {
    path: PathBuf,
    prefix: String,
}

impl VersionHeaderUpdater {
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl Updater for VersionHeaderUpdater {
    async fn apply(&self, root: &Path, version: &Version) -> Result<()> {
        let path = root.join(&self.path);
        let content = read_file_safe(&path)?;
        let prefix = &self.prefix;

        let anchor = format!("#define {}_MAJOR_VERSION", prefix);
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        let idx = lines
            .iter()
            .position(|line| line.contains(&anchor))
            .with_context(|| format!("{}: no `{}` line found", path.display(), anchor))?;

        if idx + 4 >= lines.len() {
            bail!(
                "{}: unexpected layout after the major version define",
                path.display()
            );
        }

        lines[idx] = format!("#define {}_MAJOR_VERSION {}", prefix, version.major);
        lines[idx + 1] = format!("#define {}_MINOR_VERSION {}", prefix, version.minor);
        lines[idx + 2] = format!("#define {}_PATCH_VERSION {}", prefix, version.patch);
        lines[idx + 4] = match &version.prerelease {
            Some(pre) => format!("#define {}_PRE_RELEASE_VERSION -{}", prefix, pre),
            None => format!("// #define {}_PRE_RELEASE_VERSION", prefix),
        };

        write_file_atomic(&path, &join_lines(&lines, &content))
    }

    fn name(&self) -> &'static str {
        "version header"
    }
}
