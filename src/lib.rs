//! Vendor Verify Core - GPG trust verification for installed dependencies
//!
//! Every package installed from source control must be backed by a commit
//! or tag signed with a key the local gpg trust store has certified. One
//! untrusted package fails the whole run, and the failure names every
//! offending package together with the exact commands and output that
//! led to the verdict.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `signature` - Parse signing-tool output into signed/trusted facts
//! - `package` - Per-package verdicts (git-backed or unknown format)
//! - `pipeline` - Verification orchestrator and run context
//! - `report` - Aggregate trust decision and failure report
//! - `runner` - git/gpg invocation behind the `CheckRunner` trait
//! - `installation` - Installed package discovery
//! - `config` - Manifest settings and the source-install precondition
//! - `logging` - Structured logging with run context

pub mod config;
pub mod error;
pub mod installation;
pub mod logging;
pub mod package;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod signature;

pub use error::VerifyError;

use config::ProjectConfig;
use installation::Installation;
use pipeline::context::RunContext;
use pipeline::verification::Verifier;
use report::trust::TrustReport;
use runner::command::CheckRunner;

/// Initialize the process-wide logger.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug when verbose.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Verify every installed package and return the verdicts.
///
/// Fails early only if packages are not installed from source or cannot
/// be enumerated. Untrusted packages do not fail here; see
/// `TrustReport::evaluate`.
pub fn verify_installation<I: Installation, R: CheckRunner>(
    config: &ProjectConfig,
    installation: &I,
    runner: R,
) -> Result<TrustReport, VerifyError> {
    config.assert_source_installation()?;

    let ctx = RunContext::new();
    let packages = installation.installed_packages()?;

    crate::log_info!(
        ctx.log_context(),
        "INSTALLATION_SCANNED",
        vendor_dir = config.vendor_dir.display().to_string(),
        packages = packages.len(),
    );

    let verdicts = Verifier::new(runner).verify_packages(&ctx, installation, &packages);

    Ok(TrustReport::new(verdicts))
}

/// Verify every installed package and fail if any is not trusted.
pub fn run_trust_verification<I: Installation, R: CheckRunner>(
    config: &ProjectConfig,
    installation: &I,
    runner: R,
) -> Result<(), VerifyError> {
    verify_installation(config, installation, runner)?.evaluate()
}
