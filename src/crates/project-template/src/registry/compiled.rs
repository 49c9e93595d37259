//! Metadata compiled into the crate by Cargo.

use super::{normalize_name, MetadataRegistry};
use crate::error::{MetadataError, Result};

/// Package name from Cargo.toml
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Package version from Cargo.toml, if the build recorded one
const PKG_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// The registry of build-time metadata.
///
/// Knows exactly one distribution: this crate. Builds that bypass Cargo do not
/// record a version, in which case the registry reports itself unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRegistry {
    package: &'static str,
    version: Option<&'static str>,
}

impl BuildRegistry {
    pub const fn new() -> Self {
        Self {
            package: PKG_NAME,
            version: PKG_VERSION,
        }
    }

    /// Name of the distribution this registry describes.
    pub fn package(&self) -> &'static str {
        self.package
    }
}

impl Default for BuildRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRegistry for BuildRegistry {
    fn name(&self) -> &str {
        "build"
    }

    fn version(&self, package: &str) -> Result<String> {
        if normalize_name(package) != normalize_name(self.package) {
            return Err(MetadataError::PackageNotFound(package.to_string()));
        }

        self.version
            .map(str::to_string)
            .ok_or_else(|| MetadataError::Unavailable {
                registry: self.name().to_string(),
                reason: "build did not record CARGO_PKG_VERSION".to_string(),
            })
    }
}
