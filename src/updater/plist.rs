use super::{Updater, join_lines, read_file_safe, write_file_atomic};
use crate::version::Version;
use anyhow::{Result, bail};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Version keys in the bundle plist whose `<string>` values carry the version.
const VERSION_KEYS: [&str; 2] = ["CFBundleVersion", "CFBundleShortVersionString"];

/// The macOS bundle metadata file.
///
/// Rewrites the `<string>` value following each version key in place,
/// leaving the rest of the file untouched.
pub struct PlistUpdater {
    path: PathBuf,
}

impl PlistUpdater {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Updater for PlistUpdater {
    async fn apply(&self, root: &Path, version: &Version) -> Result<()> {
        let path = root.join(&self.path);
        let content = read_file_safe(&path)?;

        let value_re = Regex::new(r"<string>[^<]*</string>").expect("Invalid pattern");
        let replacement = format!("<string>{}</string>", version);

        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        let mut awaiting_value = false;
        let mut rewritten = 0;

        for line in lines.iter_mut() {
            if awaiting_value && line.contains("<string>") {
                *line = value_re.replace(line, replacement.as_str()).into_owned();
                awaiting_value = false;
                rewritten += 1;
                continue;
            }
            if VERSION_KEYS
                .iter()
                .any(|key| line.contains(&format!("<key>{}</key>", key)))
            {
                awaiting_value = true;
            }
        }

        if rewritten != VERSION_KEYS.len() {
            bail!(
                "{}: expected {} version keys, rewrote {}",
                path.display(),
                VERSION_KEYS.len(),
                rewritten
            );
        }

        write_file_atomic(&path, &join_lines(&lines, &content))
    }

    fn name(&self) -> &'static str {
        "bundle plist"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>App</string>
	<key>CFBundleVersion</key>
	<string>2.0.0</string>
	<key>CFBundleShortVersionString</key>
	<string>2.0.0</string>
</dict>
</plist>
"#;

    fn write_plist(temp: &TempDir) -> std::path::PathBuf {
        let dir = temp.path().join("resources/mac");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Info.plist");
        std::fs::write(&path, PLIST).unwrap();
        path
    }

    #[tokio::test]
    async fn test_rewrites_both_version_values() {
        let temp = TempDir::new().unwrap();
        let path = write_plist(&temp);

        let updater = PlistUpdater::new("resources/mac/Info.plist");
        let version = Version::parse("2.0.1-beta.3").unwrap();
        updater.apply(temp.path(), &version).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.matches("<string>2.0.1-beta.3</string>").count(), 2);
        // The bundle name value is untouched.
        assert!(written.contains("<string>App</string>"));
    }

    #[tokio::test]
    async fn test_layout_is_preserved() {
        let temp = TempDir::new().unwrap();
        let path = write_plist(&temp);

        let updater = PlistUpdater::new("resources/mac/Info.plist");
        updater
            .apply(temp.path(), &Version::new(2, 0, 1))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), PLIST.lines().count());
        assert!(written.starts_with("<?xml"));
        assert!(written.ends_with("</plist>\n"));
        assert!(written.contains("\t<key>CFBundleVersion</key>"));
    }

    #[tokio::test]
    async fn test_missing_keys_are_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("resources/mac");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("Info.plist"),
            "<dict>\n<key>CFBundleName</key>\n<string>App</string>\n</dict>\n",
        )
        .unwrap();

        let updater = PlistUpdater::new("resources/mac/Info.plist");
        let err = updater
            .apply(temp.path(), &Version::new(2, 0, 1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("version keys"));
    }
}
