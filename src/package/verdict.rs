//! Package verdict types.

use serde::Serialize;

use crate::signature::check::SignatureCheck;

/// Kind of verdict, for summaries and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    GitBacked,
    UnknownFormat,
}

impl VerdictKind {
    pub fn as_str(&self) -> &str {
        match self {
            VerdictKind::GitBacked => "git_backed",
            VerdictKind::UnknownFormat => "unknown_format",
        }
    }
}

/// A git working copy and every signature check run against it.
///
/// Holds at least one check: the current commit check comes first,
/// followed by any tag checks in the order they were run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitPackage {
    package_name: String,
    checks: Vec<SignatureCheck>,
}

impl GitPackage {
    pub fn checks(&self) -> &[SignatureCheck] {
        &self.checks
    }

    pub fn passed_checks(&self) -> impl Iterator<Item = &SignatureCheck> {
        self.checks.iter().filter(|check| check.is_trusted())
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &SignatureCheck> {
        self.checks.iter().filter(|check| !check.is_trusted())
    }
}

/// A package installed in a form that carries no verifiable signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPackage {
    package_name: String,
}

/// Outcome of verifying one installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageVerdict {
    GitBacked(GitPackage),
    UnknownFormat(UnknownPackage),
}

impl PackageVerdict {
    /// Verdict for a git-backed package. The first check is mandatory.
    pub fn git_backed(
        package_name: &str,
        first_check: SignatureCheck,
        further_checks: Vec<SignatureCheck>,
    ) -> Self {
        let mut checks = Vec::with_capacity(1 + further_checks.len());
        checks.push(first_check);
        checks.extend(further_checks);

        PackageVerdict::GitBacked(GitPackage {
            package_name: package_name.to_string(),
            checks,
        })
    }

    /// Verdict for a package that is not a git working copy.
    pub fn unknown_format(package_name: &str) -> Self {
        PackageVerdict::UnknownFormat(UnknownPackage {
            package_name: package_name.to_string(),
        })
    }

    pub fn package_name(&self) -> &str {
        match self {
            PackageVerdict::GitBacked(package) => &package.package_name,
            PackageVerdict::UnknownFormat(package) => &package.package_name,
        }
    }

    pub fn kind(&self) -> VerdictKind {
        match self {
            PackageVerdict::GitBacked(_) => VerdictKind::GitBacked,
            PackageVerdict::UnknownFormat(_) => VerdictKind::UnknownFormat,
        }
    }

    /// True if any check of a git-backed package is trusted.
    pub fn is_verified(&self) -> bool {
        match self {
            PackageVerdict::GitBacked(package) => package.passed_checks().next().is_some(),
            PackageVerdict::UnknownFormat(_) => false,
        }
    }

    /// Explain the verdict: the passing checks if verified, the failing
    /// ones otherwise.
    pub fn print_reason(&self) -> String {
        match self {
            PackageVerdict::GitBacked(package) => {
                let (header, checks): (_, Vec<&SignatureCheck>) = if self.is_verified() {
                    (
                        "The following GIT GPG signature checks passed for package",
                        package.passed_checks().collect(),
                    )
                } else {
                    (
                        "The following GIT GPG signature checks have failed for package",
                        package.failed_checks().collect(),
                    )
                };

                let body = checks
                    .iter()
                    .map(|check| check.to_string())
                    .collect::<Vec<_>>()
                    .join("\n\n");

                format!("{} \"{}\":\n\n{}", header, package.package_name, body)
            }
            PackageVerdict::UnknownFormat(package) => format!(
                "Package \"{}\" is in a format that cannot be verified: \
                 try forcing it to be downloaded as GIT repository",
                package.package_name
            ),
        }
    }
}
