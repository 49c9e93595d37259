//! Minimal library scaffold.
//!
//! This crate is meant to be copied to bootstrap new projects. On its own it
//! only knows its name and version; everything else is left for the project
//! built from it.
//!
//! # Version
//!
//! [`VERSION`] is resolved once, on first access, from the package metadata
//! Cargo records at build time. Resolution never fails: when the metadata
//! cannot be read the version reads [`SENTINEL_VERSION`] (`"0.0.0"`).
//!
//! ```rust
//! assert!(!project_template::version().is_empty());
//! assert!(project_template::PUBLIC_EXPORTS.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`registry`] - distribution metadata registries (build metadata,
//!   `Cargo.lock`, in-memory, chains)
//! - [`version`] - best-effort version resolution with sentinel fallback
//! - [`config`] - which package and registries to use, from files or the
//!   environment
//!
//! # Features
//!
//! - `lockfile` - `Cargo.lock` backed registry (enabled by default)
//! - `config` - configuration loading (enabled by default)

use std::sync::LazyLock;

pub mod error;
pub mod registry;
pub mod version;

#[cfg(feature = "config")]
pub mod config;

// Re-export commonly used types
pub use error::{MetadataError, Result};
pub use registry::{BuildRegistry, ChainRegistry, InMemoryRegistry, MetadataRegistry};
pub use version::{
    lookup_version, resolve_version, resolve_version_with, OrSentinel, ResolvedVersion,
    VersionSource, SENTINEL_VERSION,
};

#[cfg(feature = "lockfile")]
pub use registry::LockfileRegistry;

#[cfg(feature = "config")]
pub use config::{FromEnv, TemplateConfig, ValidateConfig};

/// Distribution name of this package.
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Names this package exports publicly. Empty until a project fills it in.
pub const PUBLIC_EXPORTS: &[&str] = &[];

/// Version of this package, resolved once per process.
pub static VERSION: LazyLock<String> = LazyLock::new(|| resolve_version(PACKAGE_NAME));

/// Get the resolved version of this package.
pub fn version() -> &'static str {
    VERSION.as_str()
}
