//! Errors that cross the verification boundary.
//!
//! Individual check failures never show up here; they are folded into
//! `PackageVerdict`s and only surface as text inside
//! `PackagesTrustCheckFailed`.

use crate::installation::InstallationError;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Packages were not installed from source, so there is no git
    /// history to verify.
    #[error(
        "The detected preferred install required for the git verification to work correctly is \"source\", \
         but your composer.json configuration reported {found}.\n\
         Please edit your composer.json to enforce \"source\" installation as described at \
         https://getcomposer.org/doc/06-config.md#preferred-install"
    )]
    PreferredInstallNotSource { found: String },

    /// One or more packages failed verification. Carries the full report.
    #[error("{report}")]
    PackagesTrustCheckFailed { report: String },

    #[error(transparent)]
    Installation(#[from] InstallationError),
}
