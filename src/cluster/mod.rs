//! Cluster lifecycle contract and its combinators.
//!
//! Every participant of a topology tree implements [`Cluster`]: concrete
//! leaves that talk to a control plane as well as the two combinators,
//! [`Group`] (concurrent peers) and [`Composite`] (ordered stages). Trees
//! nest freely and a whole tree is driven exactly like a single cluster.

mod composite;
mod group;
mod inventory;
mod node;

pub use composite::*;
pub use group::*;
pub use node::*;


use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Brings the represented cluster(s) into ready state.
    async fn apply(&self) -> Result<()>;

    /// Tears the represented cluster(s) down.
    async fn delete(&self) -> Result<()>;

    /// Internal members contributed by this cluster or subtree
    async fn get_nodes(&self) -> Result<Vec<Node>>;

    /// Client endpoints contributed by this cluster or subtree
    async fn get_client_nodes(&self) -> Result<Vec<ClientNode>>;
}

/// Lets `group!`/`composite!` take leaves already boxed by a provider.
#[async_trait]
impl<T> Cluster for Box<T>
where
    T: Cluster + ?Sized,
{
    async fn apply(&self) -> Result<()> {
        (**self).apply().await
    }

    async fn delete(&self) -> Result<()> {
        (**self).delete().await
    }

    async fn get_nodes(&self) -> Result<Vec<Node>> {
        (**self).get_nodes().await
    }

    async fn get_client_nodes(&self) -> Result<Vec<ClientNode>> {
        (**self).get_client_nodes().await
    }
}

/// Lifecycle transition driven through a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Apply,
    Delete,
}

impl Operation {
    pub(crate) async fn run(
        self,
        cluster: &dyn Cluster,
    ) -> Result<()> {
        match self {
            Operation::Apply => cluster.apply().await,
            Operation::Delete => cluster.delete().await,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Operation::Apply => f.write_str("apply"),
            Operation::Delete => f.write_str("delete"),
        }
    }
}

/// Builds a [`Group`] from cluster values, boxing each one.
///
/// ```ignore
/// let ab = group![tidb_a, tidb_b];
/// ```
#[macro_export]
macro_rules! group {
    ($($cluster:expr),* $(,)?) => {
        $crate::Group::new(vec![
            $(Box::new($cluster) as Box<dyn $crate::Cluster>),*
        ])
    };
}

/// Builds a [`Composite`] from cluster values, boxing each one.
///
/// ```ignore
/// let cdc = composite![group![upstream, downstream], cdc_relay];
/// ```
#[macro_export]
macro_rules! composite {
    ($($cluster:expr),* $(,)?) => {
        $crate::Composite::new(vec![
            $(Box::new($cluster) as Box<dyn $crate::Cluster>),*
        ])
    };
}
