//! In-memory metadata registry.

use super::{normalize_name, MetadataRegistry};
use crate::error::{MetadataError, Result};
use std::collections::HashMap;

/// A registry backed by a name to version map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    packages: HashMap<String, String>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InMemoryRegistry::insert`].
    pub fn with_package(mut self, name: impl AsRef<str>, version: impl Into<String>) -> Self {
        self.insert(name, version);
        self
    }

    /// Record `version` for `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl AsRef<str>, version: impl Into<String>) -> Option<String> {
        self.packages
            .insert(normalize_name(name.as_ref()), version.into())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for InMemoryRegistry {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, version) in iter {
            registry.insert(name, version);
        }
        registry
    }
}

impl MetadataRegistry for InMemoryRegistry {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self, package: &str) -> Result<String> {
        self.packages
            .get(&normalize_name(package))
            .cloned()
            .ok_or_else(|| MetadataError::PackageNotFound(package.to_string()))
    }
}
