use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process;

use relbump::bump::{self, BumpKind};
use relbump::cli::Cli;
use relbump::config::BumpConfig;
use relbump::error::BumpError;
use relbump::updater;
use relbump::vcs::{GitVcs, Vcs};
use relbump::version::Version;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle no-color flag
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&cli).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    if !cli.requests_action() {
        // Nothing requested: show usage and exit cleanly.
        let _ = Cli::command().print_help();
        println!();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => BumpConfig::load_from_path(path)?,
        None => BumpConfig::discover(&cli.root)?,
    };

    let version_path = cli.root.join(&config.paths.version_file);
    let raw = std::fs::read_to_string(&version_path)
        .with_context(|| format!("Failed to read {}", version_path.display()))?;
    let current = Version::parse(raw.trim()).map_err(BumpError::from)?;

    if cli.verbose {
        println!(
            "{}",
            format!("Current version: {} ({} channel)", current, current.channel()).cyan()
        );
    }

    let vcs = GitVcs::new(&cli.root);

    let next = if let Some(explicit) = &cli.version {
        // Direct override: validate, then skip the progression rules.
        Version::parse(explicit).map_err(BumpError::from)?
    } else {
        let keyword = cli.bump_keyword().context("No bump type requested")?;
        let kind: BumpKind = keyword.parse()?;
        let today = chrono::Local::now().date_naive();
        bump::next_with_vcs(&current, kind, &vcs, &config.mainline, today).await?
    };

    if cli.dry_run {
        println!("Would bump to version: {}", next.to_string().green());
        return Ok(());
    }

    let updaters = updater::updaters_for(&config);
    if cli.verbose {
        for u in &updaters {
            println!("{}", format!("Updating {}", u.name()).cyan());
        }
    }
    updater::apply_all(&updaters, &cli.root, &next).await?;

    // The commit snapshots the artifacts written above, so it runs strictly
    // after the fan-out.
    vcs.commit_all(&format!("Bump v{}", next)).await?;

    println!(
        "{} Bumped to version: {}",
        "✓".green(),
        next.to_string().green().bold()
    );

    Ok(())
}
