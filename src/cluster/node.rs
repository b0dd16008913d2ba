use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Deployable piece of a topology a [`Node`] belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Pd,
    Tikv,
    Tidb,
    Tiflash,
    Pump,
    Drainer,
    Cdc,
    /// Component kinds owned by leaf implementations outside this crate
    Other(String),
}

impl fmt::Display for Component {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Component::Pd => f.write_str("pd"),
            Component::Tikv => f.write_str("tikv"),
            Component::Tidb => f.write_str("tidb"),
            Component::Tiflash => f.write_str("tiflash"),
            Component::Pump => f.write_str("pump"),
            Component::Drainer => f.write_str("drainer"),
            Component::Cdc => f.write_str("cdc"),
            Component::Other(name) => f.write_str(name),
        }
    }
}

/// Internal member of a provisioned cluster, used for wiring components
/// of the same topology together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub namespace: String,
    pub cluster_name: String,
    pub component: Component,
    pub pod_name: String,
    pub ip: String,
    pub port: u16,
}

/// Externally reachable endpoint test clients connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientNode {
    pub namespace: String,
    pub cluster_name: String,
    pub ip: String,
    pub port: u16,
}

impl ClientNode {
    /// "ip:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
