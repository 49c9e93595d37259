//! Distribution metadata registries.
//!
//! A registry maps installed distribution names to their recorded metadata.
//! Only the version is queried here. Lookups are read-only and return
//! [`MetadataError::PackageNotFound`] when the registry has no entry for the
//! requested name; every other variant means the registry itself could not be
//! consulted.
//!
//! # Example
//!
//! ```rust
//! use project_template::registry::{ChainRegistry, InMemoryRegistry, MetadataRegistry};
//!
//! let chain = ChainRegistry::new()
//!     .with(InMemoryRegistry::new().with_package("first", "1.0.0"))
//!     .with(InMemoryRegistry::new().with_package("second", "2.0.0"));
//!
//! assert_eq!(chain.version("second").unwrap(), "2.0.0");
//! assert!(chain.version("third").unwrap_err().is_not_found());
//! ```

mod compiled;
mod memory;

#[cfg(feature = "lockfile")]
mod lockfile;

pub use compiled::BuildRegistry;
pub use memory::InMemoryRegistry;

#[cfg(feature = "lockfile")]
pub use lockfile::LockfileRegistry;

use crate::error::{MetadataError, Result};
use std::sync::Arc;
use tracing::debug;

/// A read-only source of installed distribution metadata.
pub trait MetadataRegistry: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Look up the recorded version of `package`.
    fn version(&self, package: &str) -> Result<String>;
}

impl<R: MetadataRegistry + ?Sized> MetadataRegistry for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn version(&self, package: &str) -> Result<String> {
        (**self).version(package)
    }
}

impl<R: MetadataRegistry + ?Sized> MetadataRegistry for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn version(&self, package: &str) -> Result<String> {
        (**self).version(package)
    }
}

impl<R: MetadataRegistry + ?Sized> MetadataRegistry for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn version(&self, package: &str) -> Result<String> {
        (**self).version(package)
    }
}

/// Normalize a distribution name for comparison.
///
/// Names are matched case-insensitively and `-`, `_` and `.` are treated as
/// the same separator, so `Python_Template` and `python-template` refer to
/// one distribution.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | '.' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Consults several registries in order.
///
/// The first registry that knows the package wins. A miss in one registry
/// falls through to the next; a hard failure is remembered and reported only
/// if no later registry answers.
#[derive(Default)]
pub struct ChainRegistry {
    registries: Vec<Box<dyn MetadataRegistry>>,
}

impl ChainRegistry {
    /// Create an empty chain. An empty chain knows no packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registry to the end of the chain.
    pub fn with(mut self, registry: impl MetadataRegistry + 'static) -> Self {
        self.push(registry);
        self
    }

    /// Append a registry to the end of the chain.
    pub fn push(&mut self, registry: impl MetadataRegistry + 'static) {
        self.registries.push(Box::new(registry));
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl MetadataRegistry for ChainRegistry {
    fn name(&self) -> &str {
        "chain"
    }

    fn version(&self, package: &str) -> Result<String> {
        let mut failure = None;

        for registry in &self.registries {
            match registry.version(package) {
                Ok(version) => return Ok(version),
                Err(err) if err.is_not_found() => continue,
                Err(err) => {
                    debug!(
                        registry = registry.name(),
                        package,
                        error = %err,
                        "Metadata registry failed, trying next"
                    );
                    failure.get_or_insert(err);
                }
            }
        }

        Err(failure.unwrap_or_else(|| MetadataError::PackageNotFound(package.to_string())))
    }
}

impl std::fmt::Debug for ChainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.registries.iter().map(|r| r.name()))
            .finish()
    }
}
