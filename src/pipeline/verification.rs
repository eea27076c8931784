//! Per-package verification.
//!
//! For each installed package:
//! 1. Resolve the install path
//! 2. No `.git` directory -> unknown format
//! 3. Verify the current commit
//! 4. If that is not trusted, verify tags pointing at the commit until
//!    one is trusted
//! 5. Wrap every check that ran into a git-backed verdict
//!
//! Nothing here fails. A broken or missing tool just produces untrusted
//! checks.

use std::path::Path;

use crate::installation::{InstalledPackage, Installation};
use crate::logging::structured::LogContext;
use crate::package::verdict::PackageVerdict;
use crate::runner::command::{CheckCommand, CheckRunner};
use crate::signature::check::SignatureCheck;
use crate::{log_debug, log_info, log_warn};

use super::context::RunContext;

/// Produces one `PackageVerdict` per installed package.
#[derive(Debug, Clone)]
pub struct Verifier<R> {
    runner: R,
}

impl<R: CheckRunner> Verifier<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Verify every package, preserving input order.
    pub fn verify_packages<I: Installation>(
        &self,
        ctx: &RunContext,
        installation: &I,
        packages: &[InstalledPackage],
    ) -> Vec<PackageVerdict> {
        log_info!(ctx.log_context(), "VERIFY_RUN_START", packages = packages.len());

        let verdicts: Vec<PackageVerdict> = packages
            .iter()
            .map(|package| self.verify_package(ctx, installation, package))
            .collect();

        log_info!(
            ctx.log_context(),
            "VERIFY_RUN_COMPLETE",
            packages = verdicts.len(),
            verified = verdicts.iter().filter(|v| v.is_verified()).count(),
            elapsed_ms = ctx.elapsed_ms(),
        );

        verdicts
    }

    pub fn verify_package<I: Installation>(
        &self,
        ctx: &RunContext,
        installation: &I,
        package: &InstalledPackage,
    ) -> PackageVerdict {
        let log_ctx = ctx.package_context(&package.name);
        let install_path = installation.install_path_of(&package.name);

        log_debug!(log_ctx, "PACKAGE_VERIFY_START", path = install_path.display().to_string());

        if !installation.has_version_control_metadata(&install_path) {
            log_warn!(log_ctx, "PACKAGE_UNKNOWN_FORMAT", path = install_path.display().to_string());
            return PackageVerdict::unknown_format(&package.name);
        }

        let commit_check = self.check_commit(&log_ctx, &package.name, &install_path);

        let tag_checks = if commit_check.is_trusted() {
            Vec::new()
        } else {
            self.check_tags(&log_ctx, &package.name, &install_path)
        };

        let verdict = PackageVerdict::git_backed(&package.name, commit_check, tag_checks);

        log_info!(
            log_ctx,
            "PACKAGE_VERDICT",
            kind = verdict.kind().as_str(),
            verified = verdict.is_verified(),
        );

        verdict
    }

    fn check_commit(&self, log_ctx: &LogContext, package_name: &str, install_path: &Path) -> SignatureCheck {
        let result = self.runner.run_check(&CheckCommand::verify_commit(install_path));
        let check = SignatureCheck::from_commit_check(
            package_name,
            &result.command_line,
            result.exit_code,
            &result.output,
        );

        log_debug!(
            log_ctx.with_check("HEAD"),
            "COMMIT_CHECK",
            exit_code = check.exit_code(),
            key = check.signing_key_id(),
            signed = check.is_signed(),
            trusted = check.is_trusted(),
        );

        check
    }

    /// Runs tag checks in listed order, stopping after the first trusted one.
    /// Every check that ran is returned, trusted or not. A failed listing
    /// means no tags.
    fn check_tags(&self, log_ctx: &LogContext, package_name: &str, install_path: &Path) -> Vec<SignatureCheck> {
        let listing = self.runner.run_check(&CheckCommand::list_tags(install_path));
        if listing.exit_code != 0 {
            log_warn!(log_ctx, "TAG_LIST_FAILED", exit_code = listing.exit_code, output = &listing.output);
            return Vec::new();
        }
        let tags = listing.non_blank_lines();

        log_debug!(log_ctx, "TAG_LIST", exit_code = listing.exit_code, tags = &tags);

        let mut checks = Vec::new();
        for tag in &tags {
            let result = self.runner.run_check(&CheckCommand::verify_tag(install_path, tag));
            let check = SignatureCheck::from_tag_check(
                package_name,
                &result.command_line,
                result.exit_code,
                &result.output,
            );

            log_debug!(
                log_ctx.with_check(tag),
                "TAG_CHECK",
                exit_code = check.exit_code(),
                key = check.signing_key_id(),
                trusted = check.is_trusted(),
            );

            let trusted = check.is_trusted();
            checks.push(check);
            if trusted {
                break;
            }
        }

        checks
    }
}
