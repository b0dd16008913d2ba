//! Topology Error Hierarchy
//!
//! Errors are produced by leaf clusters and travel through combinators
//! unchanged, so the value a caller receives always names the leaf that
//! failed.

use config::ConfigError;

/// Boxed leaf-side cause attached to lifecycle and inventory errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Apply/Delete failures reported by a leaf or nested combinator
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Node or client node inventory could not be determined
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Topology configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecoverable failures requiring the test run to abort
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Cluster could not be brought into ready state
    #[error("Failed to apply cluster {cluster}: {source}")]
    Apply {
        cluster: String,
        #[source]
        source: BoxError,
    },

    /// Cluster could not be torn down
    #[error("Failed to delete cluster {cluster}: {source}")]
    Delete {
        cluster: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Failed to get nodes of cluster {cluster}: {source}")]
    Nodes {
        cluster: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to get client nodes of cluster {cluster}: {source}")]
    ClientNodes {
        cluster: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn apply(
        cluster: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        LifecycleError::Apply {
            cluster: cluster.into(),
            source: source.into(),
        }
        .into()
    }

    pub fn delete(
        cluster: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        LifecycleError::Delete {
            cluster: cluster.into(),
            source: source.into(),
        }
        .into()
    }

    pub fn nodes(
        cluster: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        InventoryError::Nodes {
            cluster: cluster.into(),
            source: source.into(),
        }
        .into()
    }

    pub fn client_nodes(
        cluster: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        InventoryError::ClientNodes {
            cluster: cluster.into(),
            source: source.into(),
        }
        .into()
    }

    /// Name of the cluster the error originated from, if it carries one
    pub fn cluster(&self) -> Option<&str> {
        match self {
            Error::Lifecycle(LifecycleError::Apply { cluster, .. })
            | Error::Lifecycle(LifecycleError::Delete { cluster, .. })
            | Error::Inventory(InventoryError::Nodes { cluster, .. })
            | Error::Inventory(InventoryError::ClientNodes { cluster, .. }) => Some(cluster.as_str()),
            Error::Config(_) | Error::Fatal(_) => None,
        }
    }
}

pub(crate) fn invalid_config(msg: impl Into<String>) -> Error {
    Error::Config(ConfigError::Message(msg.into()))
}
