//! Sequential composition.
//!
//! A [`Composite`] encodes "must happen after": a replication relay that
//! captures changes from one database and replays them into another is only
//! attached once both endpoints exist.

use async_trait::async_trait;
use tracing::debug;
use tracing::error;
use tracing::instrument;

use super::inventory::collect_client_nodes;
use super::inventory::collect_nodes;
use super::ClientNode;
use super::Cluster;
use super::Node;
use super::Operation;
use crate::Result;

/// Applies and deletes its children one after another in declared order,
/// stopping at the first failure.
///
/// Delete walks the children in the same order as Apply. Callers that need
/// teardown in reverse dependency order declare the children reversed in a
/// separate Composite.
pub struct Composite {
    clusters: Vec<Box<dyn Cluster>>,
}

impl Composite {
    pub fn new(clusters: Vec<Box<dyn Cluster>>) -> Self {
        Self { clusters }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    async fn run_in_order(
        &self,
        op: Operation,
    ) -> Result<()> {
        for (idx, cluster) in self.clusters.iter().enumerate() {
            debug!("stage {}: {}", idx, op);
            if let Err(e) = op.run(cluster.as_ref()).await {
                error!(
                    "composite {} stopped at stage {} of {}: {}",
                    op,
                    idx,
                    self.clusters.len(),
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Composite {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Composite").field("clusters", &self.clusters.len()).finish()
    }
}

#[async_trait]
impl Cluster for Composite {
    #[instrument(skip(self), fields(stages = self.clusters.len()))]
    async fn apply(&self) -> Result<()> {
        self.run_in_order(Operation::Apply).await
    }

    #[instrument(skip(self), fields(stages = self.clusters.len()))]
    async fn delete(&self) -> Result<()> {
        self.run_in_order(Operation::Delete).await
    }

    async fn get_nodes(&self) -> Result<Vec<Node>> {
        collect_nodes(&self.clusters).await
    }

    async fn get_client_nodes(&self) -> Result<Vec<ClientNode>> {
        collect_client_nodes(&self.clusters).await
    }
}
