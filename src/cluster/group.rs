//! Concurrent composition.
//!
//! A [`Group`] treats its children as peers without ordering dependency,
//! e.g. the "A" and "B" databases of an A/B comparison. Apply and Delete fan
//! out to every child at once and join before returning, so the call takes as
//! long as the slowest child.

use async_trait::async_trait;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tracing::debug;
use tracing::error;
use tracing::instrument;
use tracing::warn;

use super::inventory::collect_client_nodes;
use super::inventory::collect_nodes;
use super::ClientNode;
use super::Cluster;
use super::Node;
use super::Operation;
use crate::Error;
use crate::Result;

/// Applies and deletes its children concurrently.
///
/// Failure of one child never cancels its siblings: every started child runs
/// to completion and successful ones are left in place. The first error
/// observed is returned, later ones are only logged. Inventory is reported in
/// declared child order.
///
/// Children are polled inside the caller's task, not spawned. They overlap
/// only while they await, so a leaf must not block the thread inside
/// `apply`/`delete`; blocking work belongs in `spawn_blocking` or equivalent.
pub struct Group {
    clusters: Vec<Box<dyn Cluster>>,
}

impl Group {
    pub fn new(clusters: Vec<Box<dyn Cluster>>) -> Self {
        Self { clusters }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    async fn fan_out(
        &self,
        op: Operation,
    ) -> Result<()> {
        let mut tasks: FuturesUnordered<_> = self
            .clusters
            .iter()
            .enumerate()
            .map(|(idx, cluster)| async move { (idx, op.run(cluster.as_ref()).await) })
            .collect();

        let mut first_error: Option<(usize, Error)> = None;
        while let Some((idx, result)) = tasks.next().await {
            match result {
                Ok(()) => debug!("child {} finished {}", idx, op),
                Err(e) if first_error.is_none() => first_error = Some((idx, e)),
                Err(e) => warn!("child {} failed to {} as well: {}", idx, op, e),
            }
        }

        match first_error {
            Some((idx, e)) => {
                error!("group {} failed at child {}: {}", op, idx, e);
                Err(e)
            }
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Group {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Group").field("clusters", &self.clusters.len()).finish()
    }
}

#[async_trait]
impl Cluster for Group {
    #[instrument(skip(self), fields(children = self.clusters.len()))]
    async fn apply(&self) -> Result<()> {
        self.fan_out(Operation::Apply).await
    }

    #[instrument(skip(self), fields(children = self.clusters.len()))]
    async fn delete(&self) -> Result<()> {
        self.fan_out(Operation::Delete).await
    }

    async fn get_nodes(&self) -> Result<Vec<Node>> {
        collect_nodes(&self.clusters).await
    }

    async fn get_client_nodes(&self) -> Result<Vec<ClientNode>> {
        collect_client_nodes(&self.clusters).await
    }
}
