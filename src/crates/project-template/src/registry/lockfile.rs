//! Registry backed by a `Cargo.lock` file.
//!
//! The lockfile is the closest thing a Cargo build has to an installed
//! package database: every resolved dependency appears as a `[[package]]`
//! table with its exact version.

use super::{normalize_name, MetadataRegistry};
use crate::error::{MetadataError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Lockfile {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

/// Reads versions from a `Cargo.lock`.
///
/// The file is read on every lookup, so the registry always reflects the
/// lockfile as it currently is on disk. When a name is locked at several
/// versions the last entry wins; Cargo writes entries in ascending version
/// order.
#[derive(Debug, Clone)]
pub struct LockfileRegistry {
    path: PathBuf,
}

impl LockfileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Lockfile> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| MetadataError::Unavailable {
                registry: self.name().to_string(),
                reason: format!("cannot read {:?}: {}", self.path, e),
            })?;

        toml::from_str(&content).map_err(|e| MetadataError::Malformed {
            registry: self.name().to_string(),
            reason: format!("cannot parse {:?}: {}", self.path, e),
        })
    }
}

impl MetadataRegistry for LockfileRegistry {
    fn name(&self) -> &str {
        "lockfile"
    }

    fn version(&self, package: &str) -> Result<String> {
        let lockfile = self.load()?;
        let wanted = normalize_name(package);

        let mut matches = lockfile
            .package
            .into_iter()
            .filter(|locked| normalize_name(&locked.name) == wanted)
            .map(|locked| locked.version)
            .collect::<Vec<_>>();

        if matches.len() > 1 {
            debug!(
                package,
                versions = ?matches,
                "Package locked at several versions, using the last"
            );
        }

        matches
            .pop()
            .ok_or_else(|| MetadataError::PackageNotFound(package.to_string()))
    }
}
