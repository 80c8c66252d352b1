//! Configuration file support for relbump
//!
//! Supports `.relbump.toml` and `relbump.toml` configuration files.
//!
//! Example configuration:
//! ```toml
//! mainline = "main"
//! header_prefix = "APP"
//!
//! [paths]
//! version_file = "VERSION"
//! manifest = "package.json"
//! lockfile = "package-lock.json"
//! plist = "resources/mac/Info.plist"
//! header = "include/app_version.h"
//! rc = "resources/win/app.rc"
//! ```
//!
//! Every key is optional; the defaults above apply when a key or the whole
//! file is absent.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from .relbump.toml or relbump.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BumpConfig {
    /// Primary development branch, subject to the major-version nightly rule.
    pub mainline: String,

    /// Macro prefix of the version defines in the C header.
    pub header_prefix: String,

    /// Artifact locations, relative to the repository root.
    pub paths: ArtifactPaths,
}

/// Locations of the artifacts that mirror the product version.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub version_file: PathBuf,
    pub manifest: PathBuf,
    pub lockfile: PathBuf,
    pub plist: PathBuf,
    pub header: PathBuf,
    pub rc: PathBuf,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            mainline: "main".to_string(),
            header_prefix: "APP".to_string(),
            paths: ArtifactPaths::default(),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            version_file: PathBuf::from("VERSION"),
            manifest: PathBuf::from("package.json"),
            lockfile: PathBuf::from("package-lock.json"),
            plist: PathBuf::from("resources/mac/Info.plist"),
            header: PathBuf::from("include/app_version.h"),
            rc: PathBuf::from("resources/win/app.rc"),
        }
    }
}

impl BumpConfig {
    /// Load configuration by searching for config files in the given directory
    /// and parents. Falls back to the defaults when no file is found.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let config_names = [".relbump.toml", "relbump.toml"];

        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in &config_names {
                let config_path = dir.join(name);
                if config_path.exists() {
                    return Self::load_from_path(&config_path);
                }
            }
            current = dir.parent();
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in config file {}", path.display()))
    }
}
