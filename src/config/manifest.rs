//! Manifest parsing and the source-install precondition.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::VerifyError;

/// Vendor directory used when the manifest does not set one.
pub const DEFAULT_VENDOR_DIR: &str = "vendor";

/// The only install mode that leaves git checkouts behind.
pub const SOURCE_INSTALL: &str = "source";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    config: ManifestConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ManifestConfig {
    #[serde(default)]
    preferred_install: Value,
    vendor_dir: Option<String>,
}

/// Settings verification needs, with paths resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Raw `preferred-install` value; may be a string, a map or absent (null).
    pub preferred_install: Value,
    pub vendor_dir: PathBuf,
}

impl ProjectConfig {
    /// Load from a manifest file. Relative paths resolve against its directory.
    pub fn from_manifest(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_json_str(&contents, base_dir).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(contents: &str, base_dir: &Path) -> Result<Self, serde_json::Error> {
        let manifest: Manifest = serde_json::from_str(contents)?;
        let vendor_dir = manifest
            .config
            .vendor_dir
            .unwrap_or_else(|| DEFAULT_VENDOR_DIR.to_string());

        Ok(Self {
            preferred_install: manifest.config.preferred_install,
            vendor_dir: base_dir.join(vendor_dir),
        })
    }

    /// Fail unless every package is installed from source.
    pub fn assert_source_installation(&self) -> Result<(), VerifyError> {
        match &self.preferred_install {
            Value::String(mode) if mode == SOURCE_INSTALL => Ok(()),
            other => Err(VerifyError::PreferredInstallNotSource {
                found: other.to_string(),
            }),
        }
    }
}
