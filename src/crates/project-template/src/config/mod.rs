//! Configuration for version resolution.
//!
//! A [`TemplateConfig`] names the distribution to resolve and the metadata
//! sources to consult. It can be loaded from:
//! - a YAML or JSON file (format picked from the extension)
//! - environment variables with a common prefix
//!
//! # Example
//!
//! ```rust,ignore
//! use project_template::config::{FromEnv, TemplateConfig, load_config_file};
//!
//! // Load from file
//! let config: TemplateConfig = load_config_file("template.yaml")?;
//!
//! // Load from environment: MY_APP_PACKAGE_NAME, MY_APP_LOCKFILE, MY_APP_BUILD_METADATA
//! let config = TemplateConfig::from_env("MY_APP")?;
//!
//! println!("{}", config.resolve());
//! ```

use crate::error::{MetadataError, Result};
use crate::registry::{BuildRegistry, ChainRegistry, LockfileRegistry};
use crate::version::{self, ResolvedVersion};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get an environment variable as a string.
pub fn get_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|e| {
        MetadataError::Config(format!("Environment variable '{}' not found: {}", key, e))
    })
}

/// Get an environment variable with a default value.
pub fn get_env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a boolean environment variable.
pub fn get_env_bool(key: &str) -> Result<bool> {
    let value = get_env(key)?;
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(MetadataError::Config(format!(
            "Invalid boolean value for '{}': {}",
            key, value
        ))),
    }
}

/// Get a boolean environment variable with a default.
///
/// The default applies only when the variable is unset; a set but invalid
/// value is an error.
pub fn get_env_bool_or(key: &str, default: bool) -> Result<bool> {
    if std::env::var_os(key).is_none() {
        return Ok(default);
    }
    get_env_bool(key)
}

/// Load configuration from a YAML file.
pub fn load_yaml_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    serde_yaml::from_str(&content).map_err(|e| {
        MetadataError::Config(format!(
            "Failed to parse YAML config from {:?}: {}",
            path.as_ref(),
            e
        ))
    })
}

/// Load configuration from a JSON file.
pub fn load_json_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&content).map_err(|e| {
        MetadataError::Config(format!(
            "Failed to parse JSON config from {:?}: {}",
            path.as_ref(),
            e
        ))
    })
}

/// Load configuration from a file (auto-detect format from extension).
pub fn load_config_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            MetadataError::Config(format!("Unable to determine file extension for {:?}", path))
        })?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => load_yaml_config(path),
        "json" => load_json_config(path),
        _ => Err(MetadataError::Config(format!(
            "Unsupported config file extension: {}",
            extension
        ))),
    }
}

/// Trait for types that can be loaded from environment variables.
pub trait FromEnv: Sized {
    /// Load configuration from environment variables with the given prefix.
    fn from_env(prefix: &str) -> Result<Self>;
}

/// Trait for validating configuration.
pub trait ValidateConfig {
    /// Validate the configuration, returning an error if invalid.
    fn validate(&self) -> Result<()>;
}

/// Which package to resolve and where to look for its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Distribution name to query.
    pub package_name: String,

    /// `Cargo.lock` to consult before build metadata.
    pub lockfile: Option<PathBuf>,

    /// Whether to consult the metadata compiled into this crate.
    pub build_metadata: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            package_name: crate::PACKAGE_NAME.to_string(),
            lockfile: None,
            build_metadata: true,
        }
    }
}

impl TemplateConfig {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn with_lockfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.lockfile = Some(path.into());
        self
    }

    pub fn with_build_metadata(mut self, enabled: bool) -> Self {
        self.build_metadata = enabled;
        self
    }

    /// Load and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = load_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the registry chain this configuration describes.
    ///
    /// The lockfile, when set, is consulted first.
    pub fn registry(&self) -> ChainRegistry {
        let mut chain = ChainRegistry::new();
        if let Some(lockfile) = &self.lockfile {
            chain.push(LockfileRegistry::new(lockfile));
        }
        if self.build_metadata {
            chain.push(BuildRegistry::new());
        }
        debug!(package = %self.package_name, registries = ?chain, "Built metadata registry chain");
        chain
    }

    /// Resolve the configured package's version, falling back to the sentinel.
    pub fn resolve(&self) -> ResolvedVersion {
        version::resolve(&self.registry(), &self.package_name)
    }
}

impl FromEnv for TemplateConfig {
    fn from_env(prefix: &str) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            package_name: get_env_or(&format!("{}_PACKAGE_NAME", prefix), &defaults.package_name),
            lockfile: get_env(&format!("{}_LOCKFILE", prefix))
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            build_metadata: get_env_bool_or(
                &format!("{}_BUILD_METADATA", prefix),
                defaults.build_metadata,
            )?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl ValidateConfig for TemplateConfig {
    fn validate(&self) -> Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(MetadataError::Config(
                "package_name must not be empty".to_string(),
            ));
        }
        if let Some(lockfile) = &self.lockfile {
            if lockfile.as_os_str().is_empty() {
                return Err(MetadataError::Config(
                    "lockfile path must not be empty".to_string(),
                ));
            }
        }
        if self.lockfile.is_none() && !self.build_metadata {
            return Err(MetadataError::Config(
                "no metadata source enabled: set a lockfile or enable build_metadata".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::SENTINEL_VERSION;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    const LOCKFILE: &str = r#"
version = 3

[[package]]
name = "python-template"
version = "1.7.0"
"#;

    // ------------------------------------------------------------------------
    // Environment Variable Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_env_or() {
        let value = get_env_or("NONEXISTENT_VAR_12345", "default");
        assert_eq!(value, "default");
    }

    #[test]
    fn test_get_env_missing() {
        let result = get_env("DEFINITELY_NONEXISTENT_VAR_XYZ123");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_env_bool() {
        env::set_var("TPL_TEST_BOOL_YES", "yes");
        env::set_var("TPL_TEST_BOOL_OFF", "OFF");

        assert!(get_env_bool("TPL_TEST_BOOL_YES").unwrap());
        assert!(!get_env_bool("TPL_TEST_BOOL_OFF").unwrap());

        env::remove_var("TPL_TEST_BOOL_YES");
        env::remove_var("TPL_TEST_BOOL_OFF");
    }

    #[test]
    fn test_get_env_bool_or_invalid() {
        env::set_var("TPL_TEST_BOOL_INVALID", "maybe");
        assert!(get_env_bool_or("TPL_TEST_BOOL_INVALID", true).is_err());
        env::remove_var("TPL_TEST_BOOL_INVALID");

        assert!(get_env_bool_or("TPL_TEST_BOOL_UNSET", true).unwrap());
    }

    #[test]
    fn test_from_env_defaults() {
        let config = TemplateConfig::from_env("TPL_TEST_DEFAULTS").unwrap();
        assert_eq!(config, TemplateConfig::default());
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("TPL_TEST_OVERRIDE_PACKAGE_NAME", "python-template");
        env::set_var("TPL_TEST_OVERRIDE_LOCKFILE", "/tmp/Cargo.lock");
        env::set_var("TPL_TEST_OVERRIDE_BUILD_METADATA", "false");

        let config = TemplateConfig::from_env("TPL_TEST_OVERRIDE").unwrap();
        assert_eq!(config.package_name, "python-template");
        assert_eq!(config.lockfile, Some(PathBuf::from("/tmp/Cargo.lock")));
        assert!(!config.build_metadata);

        env::remove_var("TPL_TEST_OVERRIDE_PACKAGE_NAME");
        env::remove_var("TPL_TEST_OVERRIDE_LOCKFILE");
        env::remove_var("TPL_TEST_OVERRIDE_BUILD_METADATA");
    }

    #[test]
    fn test_from_env_rejects_no_sources() {
        env::set_var("TPL_TEST_NOSRC_BUILD_METADATA", "0");
        let result = TemplateConfig::from_env("TPL_TEST_NOSRC");
        assert!(result.unwrap_err().to_string().contains("no metadata source"));
        env::remove_var("TPL_TEST_NOSRC_BUILD_METADATA");
    }

    #[test]
    fn test_from_env_empty_lockfile_is_unset() {
        env::set_var("TPL_TEST_EMPTYLOCK_LOCKFILE", "");
        env::set_var("TPL_TEST_EMPTYLOCK_BUILD_METADATA", "off");

        let result = TemplateConfig::from_env("TPL_TEST_EMPTYLOCK");
        assert!(matches!(result, Err(MetadataError::Config(_))));

        env::set_var("TPL_TEST_EMPTYLOCK_BUILD_METADATA", "on");
        let config = TemplateConfig::from_env("TPL_TEST_EMPTYLOCK").unwrap();
        assert_eq!(config.lockfile, None);

        env::remove_var("TPL_TEST_EMPTYLOCK_LOCKFILE");
        env::remove_var("TPL_TEST_EMPTYLOCK_BUILD_METADATA");
    }

    #[test]
    fn test_validate_rejects_empty_lockfile_path() {
        let config = TemplateConfig::new("pkg")
            .with_lockfile("")
            .with_build_metadata(false);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lockfile path must not be empty"));

        assert!(config.with_build_metadata(true).validate().is_err());
    }

    // ------------------------------------------------------------------------
    // Config File Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_yaml_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("template.yaml");

        fs::write(
            &config_path,
            "package_name: python-template\nlockfile: Cargo.lock\n",
        )
        .unwrap();

        let config: TemplateConfig = load_config_file(&config_path).unwrap();
        assert_eq!(config.package_name, "python-template");
        assert_eq!(config.lockfile, Some(PathBuf::from("Cargo.lock")));
        assert!(config.build_metadata);
    }

    #[test]
    fn test_load_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("template.JSON");

        fs::write(
            &config_path,
            r#"{"package_name": "python-template", "build_metadata": false, "lockfile": "x.lock"}"#,
        )
        .unwrap();

        let config: TemplateConfig = load_config_file(&config_path).unwrap();
        assert!(!config.build_metadata);
        assert_eq!(config.lockfile, Some(PathBuf::from("x.lock")));
    }

    #[test]
    fn test_load_yaml_config_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yml");

        fs::write(&config_path, "package_name: [unterminated\n").unwrap();

        let result: Result<TemplateConfig> = load_config_file(&config_path);
        assert!(matches!(result, Err(MetadataError::Config(_))));
    }

    #[test]
    fn test_load_config_file_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("template.toml");

        fs::write(&config_path, "package_name = 'test'").unwrap();

        let result: Result<TemplateConfig> = load_config_file(&config_path);
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }

    #[test]
    fn test_load_config_file_no_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("template");

        fs::write(&config_path, "{}").unwrap();

        let result: Result<TemplateConfig> = load_config_file(&config_path);
        assert!(result.unwrap_err().to_string().contains("extension"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result: Result<TemplateConfig> = load_config_file("/nonexistent/path/template.yaml");
        assert!(matches!(result, Err(MetadataError::Io(_))));
    }

    #[test]
    fn test_from_file_validates() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("template.yaml");

        fs::write(&config_path, "package_name: ''\n").unwrap();

        let result = TemplateConfig::from_file(&config_path);
        assert!(result.unwrap_err().to_string().contains("package_name"));
    }

    // ------------------------------------------------------------------------
    // Resolution Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_default_config_resolves_own_version() {
        let resolved = TemplateConfig::default().resolve();
        assert_eq!(resolved.value(), env!("CARGO_PKG_VERSION"));
        assert!(!resolved.is_sentinel());
    }

    #[test]
    fn test_registry_order() {
        let config = TemplateConfig::new("pkg").with_lockfile("Cargo.lock");
        assert_eq!(format!("{:?}", config.registry()), r#"["lockfile", "build"]"#);

        let config = config.with_build_metadata(false);
        assert_eq!(config.registry().len(), 1);
    }

    #[test]
    fn test_resolve_from_lockfile() {
        let temp_dir = TempDir::new().unwrap();
        let lockfile = temp_dir.path().join("Cargo.lock");
        fs::write(&lockfile, LOCKFILE).unwrap();

        let resolved = TemplateConfig::new("python-template")
            .with_lockfile(&lockfile)
            .resolve();
        assert_eq!(resolved.value(), "1.7.0");
    }

    #[test]
    fn test_resolve_missing_lockfile_falls_back() {
        let temp_dir = TempDir::new().unwrap();

        let resolved = TemplateConfig::new("python-template")
            .with_lockfile(temp_dir.path().join("Cargo.lock"))
            .resolve();
        assert_eq!(resolved.value(), SENTINEL_VERSION);
        assert!(resolved.is_sentinel());
    }
}
