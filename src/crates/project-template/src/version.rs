//! Best-effort version resolution.
//!
//! Resolution never fails outward. Any lookup failure, whether the package is
//! not registered or the registry itself is broken, degrades to
//! [`SENTINEL_VERSION`].
//!
//! # Example
//!
//! ```rust
//! use project_template::registry::InMemoryRegistry;
//! use project_template::version::{resolve_version_with, SENTINEL_VERSION};
//!
//! let registry = InMemoryRegistry::new().with_package("my-app", "1.4.0");
//!
//! assert_eq!(resolve_version_with(&registry, "my-app"), "1.4.0");
//! assert_eq!(resolve_version_with(&registry, "python-template"), SENTINEL_VERSION);
//! ```

use crate::error::{MetadataError, Result};
use crate::registry::{BuildRegistry, MetadataRegistry};
use tracing::{debug, warn};

/// Version reported when the real version cannot be determined.
pub const SENTINEL_VERSION: &str = "0.0.0";

/// Where a resolved version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Recorded in a metadata registry.
    Registry,
    /// Lookup failed; the sentinel was substituted.
    Sentinel,
}

/// Outcome of resolving a package's version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    package: String,
    value: String,
    source: VersionSource,
}

impl ResolvedVersion {
    /// Name the version was resolved for.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The version string. Never empty.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value came from a registry or the fallback.
    pub fn source(&self) -> VersionSource {
        self.source
    }

    /// True when the lookup failed and the sentinel was substituted.
    pub fn is_sentinel(&self) -> bool {
        self.source == VersionSource::Sentinel
    }

    /// Consume the outcome, keeping only the version string.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl std::fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.package, self.value)
    }
}

/// Default-on-error combinator for version lookups.
pub trait OrSentinel {
    /// Take the looked-up version, or [`SENTINEL_VERSION`] on any error.
    fn or_sentinel(self) -> String;
}

impl OrSentinel for Result<String> {
    fn or_sentinel(self) -> String {
        self.unwrap_or_else(|_| SENTINEL_VERSION.to_string())
    }
}

/// Look up the version of `package`, surfacing failures.
///
/// An empty recorded version is reported as malformed.
pub fn lookup_version<R: MetadataRegistry + ?Sized>(
    registry: &R,
    package: &str,
) -> Result<String> {
    let version = registry.version(package)?;
    if version.trim().is_empty() {
        return Err(MetadataError::Malformed {
            registry: registry.name().to_string(),
            reason: format!("empty version recorded for '{}'", package),
        });
    }
    Ok(version)
}

/// Resolve `package` against `registry`, recording whether the sentinel was used.
pub fn resolve<R: MetadataRegistry + ?Sized>(registry: &R, package: &str) -> ResolvedVersion {
    match lookup_version(registry, package) {
        Ok(value) => ResolvedVersion {
            package: package.to_string(),
            value,
            source: VersionSource::Registry,
        },
        Err(err) => {
            if err.is_not_found() {
                debug!(
                    package,
                    registry = registry.name(),
                    "Package not registered, using sentinel version"
                );
            } else {
                warn!(
                    package,
                    registry = registry.name(),
                    error = %err,
                    "Version lookup failed, using sentinel version"
                );
            }
            ResolvedVersion {
                package: package.to_string(),
                value: SENTINEL_VERSION.to_string(),
                source: VersionSource::Sentinel,
            }
        }
    }
}

/// Resolve `package` against `registry`, falling back to [`SENTINEL_VERSION`].
pub fn resolve_version_with<R: MetadataRegistry + ?Sized>(registry: &R, package: &str) -> String {
    resolve(registry, package).into_value()
}

/// Resolve `package` against the build-time metadata of this crate.
///
/// Returns the recorded version, or [`SENTINEL_VERSION`] for any package the
/// build metadata does not describe.
pub fn resolve_version(package: &str) -> String {
    resolve_version_with(&BuildRegistry::new(), package)
}
