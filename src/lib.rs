pub mod bump;
pub mod cli;
pub mod config;
pub mod error;
pub mod tags;
pub mod updater;
pub mod vcs;
pub mod version;

pub use bump::{BumpInputs, BumpKind, next_version, next_with_vcs};
pub use cli::Cli;
pub use config::BumpConfig;
pub use error::BumpError;
pub use updater::{Updater, apply_all, updaters_for};
pub use vcs::{GitVcs, Vcs};
pub use version::{Channel, Version};
