//! Configuration management for test topologies.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
//! - Component-wise validation
mod database;
pub use database::*;


use std::env;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::invalid_config;
use crate::Result;
use crate::TopologyKind;

/// Prefix of environment variables overriding configuration, e.g.
/// `TOPOLOGY__DATABASE_A__TIKV_REPLICAS=5`
const ENV_PREFIX: &str = "TOPOLOGY";

/// Kubernetes-style DNS label limit
const MAX_LABEL_LEN: usize = 63;

/// Main configuration container describing one test topology
///
/// Combines all component configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TopologyConfig {
    /// Namespace every cluster of the topology is created in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Base name; builders derive `-upstream`, `-downstream`, `-a`, `-b`
    /// depending on `kind`, and the longest derived name must still fit a
    /// 63-character label
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub kind: TopologyKind,

    /// Database used by single-database kinds, and the "A" / upstream side
    /// of paired kinds
    #[serde(default)]
    pub database_a: DatabaseConfig,

    /// "B" / downstream side of paired kinds
    #[serde(default)]
    pub database_b: DatabaseConfig,

    #[serde(default)]
    pub binlog: BinlogConfig,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            name: default_name(),
            kind: TopologyKind::default(),
            database_a: DatabaseConfig::default(),
            database_b: DatabaseConfig::default(),
            binlog: BinlogConfig::default(),
        }
    }
}

impl TopologyConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Configuration sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from `CONFIG_PATH` environment variable (if set)
    /// 3. Environment variables with `TOPOLOGY__` prefix (highest priority)
    ///
    /// # Note
    /// Validation is deferred so further overrides can be applied with
    /// `with_override_config()`. Callers must call `validate()` before use.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("CONFIG_PATH", "config/cdc.toml");
    /// std::env::set_var("TOPOLOGY__DATABASE_A__VERSION", "v7.5.0");
    /// let cfg = TopologyConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates configuration and returns validated instance.
    ///
    /// # Errors
    /// - namespace or name not a valid lowercase DNS label (name is checked
    ///   with the longest suffix the builder of `kind` appends)
    /// - zero replica counts
    /// - empty image or storage settings
    pub fn validate(self) -> Result<Self> {
        validate_label("namespace", &self.namespace)?;
        validate_label("name", &self.name)?;
        let suffix = self.kind.longest_name_suffix();
        if self.name.len() + suffix.len() > MAX_LABEL_LEN {
            return Err(invalid_config(format!(
                "name {:?} leaves no room for the {suffix:?} suffix",
                self.name
            )));
        }

        self.database_a.validate("database_a")?;
        if self.kind.is_paired() {
            self.database_b.validate("database_b")?;
        }
        if self.kind == TopologyKind::Binlog {
            self.binlog.validate()?;
        }
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
}

/// Lowercase RFC 1123 label: `[a-z0-9-]`, alphanumeric at both ends
fn validate_label(
    field: &str,
    value: &str,
) -> Result<()> {
    if value.is_empty() {
        return Err(invalid_config(format!("{field} cannot be empty")));
    }
    if value.len() > MAX_LABEL_LEN {
        return Err(invalid_config(format!(
            "{field} {value:?} exceeds {MAX_LABEL_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid_config(format!(
            "{field} {value:?} may only contain lowercase letters, digits and '-'"
        )));
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Err(invalid_config(format!(
            "{field} {value:?} must start and end with an alphanumeric character"
        )));
    }
    Ok(())
}

fn default_namespace() -> String {
    "testinfra".to_string()
}
fn default_name() -> String {
    "tidb-cluster".to_string()
}
