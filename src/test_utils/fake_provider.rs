use std::collections::HashSet;
use std::sync::Mutex;

use super::FakeCluster;
use super::Journal;
use crate::Cluster;
use crate::ClusterProvider;
use crate::DatabaseSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Database,
    Cdc,
    Binlog,
    Tiflash,
}

/// One call made to the provider
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub kind: LeafKind,
    pub namespace: String,
    pub name: String,
    pub spec: Option<DatabaseSpec>,
}

/// Provider returning [`FakeCluster`] leaves named `<kind>/<name>`
///
/// Leaves listed with [`FakeProvider::fail_apply_of`] fail their apply.
#[derive(Default)]
pub struct FakeProvider {
    journal: Journal,
    failing: HashSet<String>,
    provisioned: Mutex<Vec<Provisioned>>,
}

impl FakeProvider {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Default::default()
        }
    }

    pub fn fail_apply_of(
        mut self,
        leaf: &str,
    ) -> Self {
        self.failing.insert(leaf.to_string());
        self
    }

    pub fn provisioned(&self) -> Vec<Provisioned> {
        self.provisioned.lock().unwrap().clone()
    }

    pub fn database_spec(
        &self,
        name: &str,
    ) -> Option<DatabaseSpec> {
        self.provisioned()
            .into_iter()
            .find(|p| p.kind == LeafKind::Database && p.name == name)
            .and_then(|p| p.spec)
    }

    fn leaf(
        &self,
        kind: LeafKind,
        namespace: &str,
        name: &str,
        spec: Option<DatabaseSpec>,
    ) -> Box<dyn Cluster> {
        self.provisioned.lock().unwrap().push(Provisioned {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            spec,
        });

        let leaf_name = leaf_name(kind, name);
        let mut leaf = FakeCluster::new(&leaf_name, &self.journal);
        if self.failing.contains(&leaf_name) {
            leaf = leaf.failing_apply();
        }
        leaf.boxed()
    }
}

pub fn leaf_name(
    kind: LeafKind,
    name: &str,
) -> String {
    let prefix = match kind {
        LeafKind::Database => "db",
        LeafKind::Cdc => "cdc",
        LeafKind::Binlog => "binlog",
        LeafKind::Tiflash => "tiflash",
    };
    format!("{prefix}/{name}")
}

impl ClusterProvider for FakeProvider {
    fn database(
        &self,
        namespace: &str,
        name: &str,
        spec: DatabaseSpec,
    ) -> Box<dyn Cluster> {
        self.leaf(LeafKind::Database, namespace, name, Some(spec))
    }

    fn cdc(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster> {
        self.leaf(LeafKind::Cdc, namespace, name, None)
    }

    fn binlog(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster> {
        self.leaf(LeafKind::Binlog, namespace, name, None)
    }

    fn tiflash(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster> {
        self.leaf(LeafKind::Tiflash, namespace, name, None)
    }
}
