use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relbump")]
#[command(
    author,
    about = "Bump the release version across the nightly, beta, and stable channels"
)]
pub struct Cli {
    /// Bump type: nightly, beta, or stable
    #[arg(long, value_name = "TYPE")]
    pub bump: Option<String>,

    /// Promote the current version to stable (same as --bump stable)
    #[arg(long)]
    pub stable: bool,

    /// Set the version directly, bypassing the bump rules
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Show what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Repository root holding the release artifacts
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Path to config file (default: auto-discover .relbump.toml or relbump.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// At least one of `--bump`, `--stable`, or `--version` must be present
    /// for the invocation to do anything.
    pub fn requests_action(&self) -> bool {
        self.bump.is_some() || self.stable || self.version.is_some()
    }

    /// The requested bump keyword, with `--stable` winning as the explicit
    /// convenience form.
    pub fn bump_keyword(&self) -> Option<&str> {
        if self.stable {
            Some("stable")
        } else {
            self.bump.as_deref()
        }
    }
}
