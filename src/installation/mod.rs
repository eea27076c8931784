//! Installed package discovery.
//!
//! The package manager owns the install layout; this module only answers
//! which packages are installed, where, and whether they are git checkouts.

pub mod vendor;

pub use vendor::*;

use std::path::{Path, PathBuf};

/// One installed package, as enumerated by an `Installation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
}

impl InstalledPackage {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Error enumerating installed packages.
#[derive(Debug, thiserror::Error)]
pub enum InstallationError {
    #[error("failed to read install directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("install root {path} is not a directory")]
    NotADirectory { path: PathBuf },
}

/// Access to the package manager's installed packages.
pub trait Installation {
    /// Installed packages, in a stable order.
    fn installed_packages(&self) -> Result<Vec<InstalledPackage>, InstallationError>;

    fn install_path_of(&self, package_name: &str) -> PathBuf;

    fn has_version_control_metadata(&self, install_path: &Path) -> bool {
        install_path.join(".git").is_dir()
    }
}
