//! Specifications handed to database leaves.
//!
//! Builders refine a [`DatabaseSpec`] by value and pass the finished spec to
//! [`ClusterProvider::database`](super::ClusterProvider::database). Nothing
//! touches a spec after its leaf exists, so a leaf never observes changes
//! while a [`Group`](crate::Group) is applying it.

use crate::BinlogConfig;
use crate::DatabaseConfig;

/// Replica count, image and optional volume of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub replicas: u32,
    pub image: String,
    pub storage: Option<String>,
}

/// Pump deployment collecting binlog on a database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpSpec {
    pub replicas: u32,
    pub image: String,
    pub storage: String,
    pub storage_class_name: String,
}

impl PumpSpec {
    pub fn from_config(
        binlog: &BinlogConfig,
        database: &DatabaseConfig,
    ) -> Self {
        Self {
            replicas: binlog.pump_replicas,
            image: database.image("tidb-binlog"),
            storage: binlog.pump_storage.clone(),
            storage_class_name: database.storage_class_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSpec {
    pub version: String,
    pub storage_class_name: String,
    pub pd: ComponentSpec,
    pub tikv: ComponentSpec,
    pub tidb: ComponentSpec,
    pump: Option<PumpSpec>,
    placement_rules: bool,
}

impl DatabaseSpec {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            version: config.version.clone(),
            storage_class_name: config.storage_class_name.clone(),
            pd: ComponentSpec {
                replicas: config.pd_replicas,
                image: config.image("pd"),
                storage: Some(config.pd_storage.clone()),
            },
            tikv: ComponentSpec {
                replicas: config.tikv_replicas,
                image: config.image("tikv"),
                storage: Some(config.tikv_storage.clone()),
            },
            tidb: ComponentSpec {
                replicas: config.tidb_replicas,
                image: config.image("tidb"),
                storage: None,
            },
            pump: None,
            placement_rules: false,
        }
    }

    /// Enables binlog on TiDB and deploys `pump` next to it.
    pub fn with_binlog(
        mut self,
        pump: PumpSpec,
    ) -> Self {
        self.pump = Some(pump);
        self
    }

    /// PD placement rules; TiFlash replicas only sync when enabled.
    pub fn with_placement_rules(
        mut self,
        enabled: bool,
    ) -> Self {
        self.placement_rules = enabled;
        self
    }

    pub fn binlog_enabled(&self) -> bool {
        self.pump.is_some()
    }

    pub fn pump(&self) -> Option<&PumpSpec> {
        self.pump.as_ref()
    }

    pub fn placement_rules_enabled(&self) -> bool {
        self.placement_rules
    }
}

impl From<&DatabaseConfig> for DatabaseSpec {
    fn from(config: &DatabaseConfig) -> Self {
        Self::from_config(config)
    }
}
