//! `<vendor-dir>/<vendor>/<package>` install layout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{InstalledPackage, Installation, InstallationError};

/// A vendor directory holding packages two levels deep.
#[derive(Debug, Clone)]
pub struct VendorDirectory {
    root: PathBuf,
}

impl VendorDirectory {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Visible subdirectory names of `dir`, symlinks followed, sorted.
fn subdirectories(dir: &Path) -> Result<Vec<String>, InstallationError> {
    let read_error = |source| InstallationError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('.') {
            continue;
        }
        // fs::metadata follows symlinks; dangling links are skipped.
        if fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

impl Installation for VendorDirectory {
    fn installed_packages(&self) -> Result<Vec<InstalledPackage>, InstallationError> {
        match fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(InstallationError::NotADirectory {
                    path: self.root.clone(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("VENDOR_DIR_MISSING path={}", self.root.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(InstallationError::ReadDir {
                    path: self.root.clone(),
                    source,
                })
            }
        }

        let mut packages = Vec::new();
        for vendor in subdirectories(&self.root)? {
            for package in subdirectories(&self.root.join(&vendor))? {
                packages.push(InstalledPackage::new(&format!("{}/{}", vendor, package)));
            }
        }

        log::debug!(
            "VENDOR_DIR_SCANNED path={} packages={}",
            self.root.display(),
            packages.len()
        );

        Ok(packages)
    }

    fn install_path_of(&self, package_name: &str) -> PathBuf {
        self.root.join(package_name)
    }
}
