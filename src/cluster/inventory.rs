//! Inventory aggregation shared by [`Group`](super::Group) and
//! [`Composite`](super::Composite).
//!
//! Children are visited one at a time in declared order. The first failure
//! aborts the walk and whatever was collected so far is dropped.

use std::future::Future;

use tracing::debug;
use tracing::warn;

use super::ClientNode;
use super::Cluster;
use super::Node;
use crate::Result;

pub(crate) async fn concat_inventory<'a, T, F, Fut>(
    kind: &'static str,
    clusters: &'a [Box<dyn Cluster>],
    fetch: F,
) -> Result<Vec<T>>
where
    F: Fn(&'a dyn Cluster) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut total = Vec::new();
    for (idx, cluster) in clusters.iter().enumerate() {
        match fetch(cluster.as_ref()).await {
            Ok(items) => {
                debug!("child {} reported {} {}", idx, items.len(), kind);
                total.extend(items);
            }
            Err(e) => {
                warn!("child {} failed to report {}: {}", idx, kind, e);
                return Err(e);
            }
        }
    }
    Ok(total)
}

pub(crate) async fn collect_nodes(clusters: &[Box<dyn Cluster>]) -> Result<Vec<Node>> {
    concat_inventory("nodes", clusters, |c| c.get_nodes()).await
}

pub(crate) async fn collect_client_nodes(clusters: &[Box<dyn Cluster>]) -> Result<Vec<ClientNode>> {
    concat_inventory("client nodes", clusters, |c| c.get_client_nodes()).await
}
