use serde::Deserialize;
use serde::Serialize;

use crate::errors::invalid_config;
use crate::Result;

/// Sizing and image settings of one database cluster
///
/// # Defaults
/// Field-level defaults use helper functions prefixed with `default_`, so a
/// partial TOML table only overrides what it names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Image tag shared by all components, e.g. `nightly` or `v7.5.0`
    #[serde(default = "default_version")]
    pub version: String,

    /// Registry prefix images are pulled from
    #[serde(default = "default_image_registry")]
    pub image_registry: String,

    #[serde(default = "default_pd_replicas")]
    pub pd_replicas: u32,

    #[serde(default = "default_tikv_replicas")]
    pub tikv_replicas: u32,

    #[serde(default = "default_tidb_replicas")]
    pub tidb_replicas: u32,

    /// Storage class backing PD and TiKV volumes
    #[serde(default = "default_storage_class_name")]
    pub storage_class_name: String,

    #[serde(default = "default_pd_storage")]
    pub pd_storage: String,

    #[serde(default = "default_tikv_storage")]
    pub tikv_storage: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            image_registry: default_image_registry(),
            pd_replicas: default_pd_replicas(),
            tikv_replicas: default_tikv_replicas(),
            tidb_replicas: default_tidb_replicas(),
            storage_class_name: default_storage_class_name(),
            pd_storage: default_pd_storage(),
            tikv_storage: default_tikv_storage(),
        }
    }
}

impl DatabaseConfig {
    /// "<registry>/<component>:<version>"
    pub fn image(
        &self,
        component: &str,
    ) -> String {
        format!("{}/{}:{}", self.image_registry, component, self.version)
    }

    pub fn validate(
        &self,
        label: &str,
    ) -> Result<()> {
        if self.version.is_empty() {
            return Err(invalid_config(format!("{label}.version cannot be empty")));
        }
        if self.image_registry.is_empty() {
            return Err(invalid_config(format!("{label}.image_registry cannot be empty")));
        }

        for (field, replicas) in [
            ("pd_replicas", self.pd_replicas),
            ("tikv_replicas", self.tikv_replicas),
            ("tidb_replicas", self.tidb_replicas),
        ] {
            if replicas == 0 {
                return Err(invalid_config(format!("{label}.{field} must be greater than 0")));
            }
        }

        for (field, value) in [
            ("storage_class_name", &self.storage_class_name),
            ("pd_storage", &self.pd_storage),
            ("tikv_storage", &self.tikv_storage),
        ] {
            if value.is_empty() {
                return Err(invalid_config(format!("{label}.{field} cannot be empty")));
            }
        }

        Ok(())
    }
}

/// Pump settings used when binlog is enabled on an upstream database
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BinlogConfig {
    #[serde(default = "default_pump_replicas")]
    pub pump_replicas: u32,

    #[serde(default = "default_pump_storage")]
    pub pump_storage: String,
}

impl Default for BinlogConfig {
    fn default() -> Self {
        Self {
            pump_replicas: default_pump_replicas(),
            pump_storage: default_pump_storage(),
        }
    }
}

impl BinlogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pump_replicas == 0 {
            return Err(invalid_config("binlog.pump_replicas must be greater than 0"));
        }
        if self.pump_storage.is_empty() {
            return Err(invalid_config("binlog.pump_storage cannot be empty"));
        }
        Ok(())
    }
}

fn default_version() -> String {
    "nightly".to_string()
}
fn default_image_registry() -> String {
    "pingcap".to_string()
}
fn default_pd_replicas() -> u32 {
    3
}
fn default_tikv_replicas() -> u32 {
    3
}
fn default_tidb_replicas() -> u32 {
    2
}
fn default_storage_class_name() -> String {
    "local-storage".to_string()
}
fn default_pd_storage() -> String {
    "10Gi".to_string()
}
fn default_tikv_storage() -> String {
    "100Gi".to_string()
}
fn default_pump_replicas() -> u32 {
    3
}
fn default_pump_storage() -> String {
    "10Gi".to_string()
}
