//! Trust report and aggregate failure.

use serde::Serialize;

use crate::error::VerifyError;
use crate::package::verdict::{PackageVerdict, VerdictKind};

/// First line of the aggregate failure message.
pub const TRUST_FAILURE_HEADER: &str = "The following packages need to be signed and verified:";

/// Machine-readable line per package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub package: String,
    pub kind: VerdictKind,
    pub verified: bool,
}

/// All verdicts of one verification run, in package order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustReport {
    verdicts: Vec<PackageVerdict>,
}

impl TrustReport {
    pub fn new(verdicts: Vec<PackageVerdict>) -> Self {
        Self { verdicts }
    }

    pub fn verdicts(&self) -> &[PackageVerdict] {
        &self.verdicts
    }

    pub fn failures(&self) -> impl Iterator<Item = &PackageVerdict> {
        self.verdicts.iter().filter(|verdict| !verdict.is_verified())
    }

    pub fn summaries(&self) -> Vec<PackageSummary> {
        self.verdicts
            .iter()
            .map(|verdict| PackageSummary {
                package: verdict.package_name().to_string(),
                kind: verdict.kind(),
                verified: verdict.is_verified(),
            })
            .collect()
    }

    pub fn evaluate(&self) -> Result<(), VerifyError> {
        evaluate(&self.verdicts)
    }
}

/// Succeed if every verdict is verified, otherwise fail with the reasons
/// of all unverified packages in input order.
pub fn evaluate(verdicts: &[PackageVerdict]) -> Result<(), VerifyError> {
    let reasons: Vec<String> = verdicts
        .iter()
        .filter(|verdict| !verdict.is_verified())
        .map(|verdict| verdict.print_reason())
        .collect();

    if reasons.is_empty() {
        log::info!("TRUST_REPORT_PASSED packages={}", verdicts.len());
        return Ok(());
    }

    log::warn!(
        "TRUST_REPORT_FAILED packages={} failed={}",
        verdicts.len(),
        reasons.len()
    );

    Err(VerifyError::PackagesTrustCheckFailed {
        report: format!("{}\n{}", TRUST_FAILURE_HEADER, reasons.join("\n\n")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::check::SignatureCheck;

    const TRUSTED: &str = "gpg:                using RSA key 4889C20D148231DC
gpg: Good signature from \"Mr. Magoo <magoo@example.com>\" [full]";

    fn git_verdict(name: &str, exit_code: i32, output: &str) -> PackageVerdict {
        PackageVerdict::git_backed(
            name,
            SignatureCheck::from_commit_check(name, "verify-commit", exit_code, output),
            vec![],
        )
    }

    #[test]
    fn test_empty_report_passes() {
        assert!(TrustReport::default().evaluate().is_ok());
    }

    #[test]
    fn test_all_verified_passes() {
        let report = TrustReport::new(vec![
            git_verdict("acme/one", 0, TRUSTED),
            git_verdict("acme/two", 0, TRUSTED),
        ]);

        assert!(report.evaluate().is_ok());
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_failure_lists_only_unverified_packages() {
        let report = TrustReport::new(vec![
            git_verdict("acme/trusted", 0, TRUSTED),
            git_verdict("acme/unsigned", 1, "error: no signature found"),
        ]);

        let message = match report.evaluate() {
            Err(VerifyError::PackagesTrustCheckFailed { report }) => report,
            other => panic!("expected trust failure, got {:?}", other),
        };

        assert!(message.starts_with(&format!("{}\n", TRUST_FAILURE_HEADER)));
        assert!(message.contains("\"acme/unsigned\""));
        assert!(!message.contains("acme/trusted"));
    }

    #[test]
    fn test_failures_keep_input_order() {
        let verdicts = vec![
            PackageVerdict::unknown_format("zeta/zipped"),
            git_verdict("acme/ok", 0, TRUSTED),
            git_verdict("beta/unsigned", 1, ""),
        ];
        let expected = format!(
            "{}\n{}\n\n{}",
            TRUST_FAILURE_HEADER,
            verdicts[0].print_reason(),
            verdicts[2].print_reason()
        );

        match evaluate(&verdicts) {
            Err(err) => assert_eq!(err.to_string(), expected),
            Ok(()) => panic!("expected trust failure"),
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let report = TrustReport::new(vec![
            PackageVerdict::unknown_format("acme/zipped"),
            git_verdict("acme/unsigned", 128, "fatal: not a git repository"),
        ]);

        let first = report.evaluate().unwrap_err().to_string();
        let second = report.clone().evaluate().unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summaries_serialize() {
        let report = TrustReport::new(vec![
            git_verdict("acme/ok", 0, TRUSTED),
            PackageVerdict::unknown_format("acme/zipped"),
        ]);

        let json = serde_json::to_value(report.summaries()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"package": "acme/ok", "kind": "git_backed", "verified": true},
                {"package": "acme/zipped", "kind": "unknown_format", "verified": false},
            ])
        );
    }
}
