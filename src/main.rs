//! vendor-verify - fail the build unless every installed dependency is
//! backed by a trusted GPG signature.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vendor_verify_core::config::ProjectConfig;
use vendor_verify_core::installation::VendorDirectory;
use vendor_verify_core::runner::git::GitCheckRunner;

/// Verify GPG signatures of git-installed vendor packages
#[derive(Parser)]
#[command(name = "vendor-verify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory containing the manifest
    #[arg(short = 'd', long, env = "VENDOR_VERIFY_WORKING_DIR", default_value = ".")]
    working_dir: PathBuf,

    /// Manifest file, relative to the working directory
    #[arg(long, default_value = "composer.json")]
    manifest: PathBuf,

    /// git executable used to run signature checks
    #[arg(long, default_value = "git")]
    git: String,

    /// Print a JSON summary of every package verdict to stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    vendor_verify_core::init_logger(cli.verbose);

    let manifest = cli.working_dir.join(&cli.manifest);
    let config = ProjectConfig::from_manifest(&manifest)
        .with_context(|| format!("Could not load project configuration from {}", manifest.display()))?;

    let installation = VendorDirectory::new(&config.vendor_dir);
    let runner = GitCheckRunner::new(&cli.git);

    let report = vendor_verify_core::verify_installation(&config, &installation, runner)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.summaries()).context("Failed to serialize summary")?
        );
    }

    report.evaluate()?;

    Ok(())
}
