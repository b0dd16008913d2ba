//! # cluster-topology
//!
//! Provisioning trees for multi-cluster database test topologies.
//!
//! A topology (two databases plus a CDC relay, an A/B pair, a database with an
//! analytical replica, ...) is described as a tree whose every node implements
//! the same lifecycle contract, [`Cluster`]:
//!
//! - **Leaves** create and destroy real clusters (supplied by a
//!   [`ClusterProvider`]).
//! - [`Group`] applies/deletes its children concurrently.
//! - [`Composite`] applies/deletes its children one after another.
//!
//! ```ignore
//! let topology = build_topology(&provider, &TopologyConfig::new()?)?;
//! topology.apply().await?;
//! let endpoints = topology.get_client_nodes().await?;
//! // ... run the workload ...
//! topology.delete().await?;
//! ```
//!
//! There is no retry, rollback or timeout at this layer. A failed `apply`
//! can leave part of the tree provisioned; call `delete` on the same tree to
//! clean up.

mod cluster;
mod config;
mod errors;
mod topology;

pub use crate::config::*;
pub use cluster::*;
pub use errors::*;
pub use topology::*;


//-----------------------------------------------------------
// Test utils
