use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::client_node;
use super::node;
use crate::ClientNode;
use crate::Cluster;
use crate::Component;
use crate::Error;
use crate::Node;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ApplyStarted,
    Applied,
    ApplyFailed,
    DeleteStarted,
    Deleted,
    DeleteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub cluster: String,
    pub step: Step,
}

pub fn event(
    cluster: &str,
    step: Step,
) -> Event {
    Event {
        cluster: cluster.to_string(),
        step,
    }
}

/// Shared, ordered record of what every fake leaf did
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(
        &self,
        cluster: &str,
        step: Step,
    ) {
        self.0.lock().unwrap().push(event(cluster, step));
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// Clusters that reached `step`, in the order they got there
    pub fn clusters_at(
        &self,
        step: Step,
    ) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.step == step)
            .map(|e| e.cluster)
            .collect()
    }

    pub fn position(
        &self,
        cluster: &str,
        step: Step,
    ) -> Option<usize> {
        self.events().iter().position(|e| e.cluster == cluster && e.step == step)
    }
}

#[derive(Debug, Default)]
struct FakeState {
    applied: AtomicBool,
    apply_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

/// Leaf cluster with scripted behavior.
///
/// Clones share state, so a test can keep one handle while the other is
/// boxed into a tree.
#[derive(Clone)]
pub struct FakeCluster {
    name: String,
    journal: Journal,
    state: Arc<FakeState>,
    fail_apply: bool,
    fail_delete: bool,
    fail_inventory: bool,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
    nodes: Vec<Node>,
    client_nodes: Vec<ClientNode>,
}

impl FakeCluster {
    /// Healthy leaf reporting one TiDB node and one client endpoint
    pub fn new(
        name: &str,
        journal: &Journal,
    ) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
            state: Arc::new(FakeState::default()),
            fail_apply: false,
            fail_delete: false,
            fail_inventory: false,
            delay: None,
            barrier: None,
            nodes: vec![node(name, Component::Tidb, 0)],
            client_nodes: vec![client_node(name)],
        }
    }

    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_inventory(mut self) -> Self {
        self.fail_inventory = true;
        self
    }

    /// Sleeps before finishing apply/delete
    pub fn with_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Waits on `barrier` after starting apply/delete
    pub fn with_barrier(
        mut self,
        barrier: Arc<Barrier>,
    ) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn with_nodes(
        mut self,
        nodes: Vec<Node>,
    ) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_client_nodes(
        mut self,
        client_nodes: Vec<ClientNode>,
    ) -> Self {
        self.client_nodes = client_nodes;
        self
    }

    pub fn is_applied(&self) -> bool {
        self.state.applied.load(Ordering::SeqCst)
    }

    pub fn apply_calls(&self) -> usize {
        self.state.apply_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.state.delete_calls.load(Ordering::SeqCst)
    }

    pub fn boxed(&self) -> Box<dyn Cluster> {
        Box::new(self.clone())
    }

    async fn pause(&self) {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Cluster for FakeCluster {
    async fn apply(&self) -> Result<()> {
        self.state.apply_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.record(&self.name, Step::ApplyStarted);
        self.pause().await;

        if self.fail_apply {
            self.journal.record(&self.name, Step::ApplyFailed);
            return Err(Error::apply(&self.name, "injected apply failure"));
        }
        self.state.applied.store(true, Ordering::SeqCst);
        self.journal.record(&self.name, Step::Applied);
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        self.state.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.record(&self.name, Step::DeleteStarted);
        self.pause().await;

        if self.fail_delete {
            self.journal.record(&self.name, Step::DeleteFailed);
            return Err(Error::delete(&self.name, "injected delete failure"));
        }
        self.state.applied.store(false, Ordering::SeqCst);
        self.journal.record(&self.name, Step::Deleted);
        Ok(())
    }

    async fn get_nodes(&self) -> Result<Vec<Node>> {
        if self.fail_inventory {
            return Err(Error::nodes(&self.name, "injected inventory failure"));
        }
        Ok(self.nodes.clone())
    }

    async fn get_client_nodes(&self) -> Result<Vec<ClientNode>> {
        if self.fail_inventory {
            return Err(Error::client_nodes(&self.name, "injected inventory failure"));
        }
        Ok(self.client_nodes.clone())
    }
}
