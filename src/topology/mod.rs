//! Ready-made topologies for replication tests.
//!
//! Each builder nests [`Group`] and [`Composite`] around leaves obtained from
//! a [`ClusterProvider`], which is the boundary to whatever control plane
//! actually creates the clusters:
//!
//! ```text
//! cdc:     Composite[ Group[ db(upstream), db(downstream) ], cdc ]
//! binlog:  Composite[ Group[ db(upstream)+pump, db(downstream) ], binlog ]
//! ab_test: Group[ db(a), db(b) ]
//! tiflash: Composite[ db+placement rules, tiflash ]
//! ```

mod spec;
pub use spec::*;


use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use crate::BinlogConfig;
use crate::Cluster;
use crate::Composite;
use crate::DatabaseConfig;
use crate::Group;
use crate::Result;
use crate::TopologyConfig;

/// Factory for leaf clusters.
pub trait ClusterProvider: Send + Sync {
    /// Database cluster (PD, TiKV, TiDB and optional pump)
    fn database(
        &self,
        namespace: &str,
        name: &str,
        spec: DatabaseSpec,
    ) -> Box<dyn Cluster>;

    /// Change-data-capture relay from `<name>-upstream` to `<name>-downstream`
    fn cdc(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster>;

    /// Binlog drainer replaying `<name>-upstream` into `<name>-downstream`
    fn binlog(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster>;

    /// Analytical replica attached to database `<name>`
    fn tiflash(
        &self,
        namespace: &str,
        name: &str,
    ) -> Box<dyn Cluster>;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    #[default]
    Default,
    Cdc,
    Binlog,
    AbTest,
    Tiflash,
    TiflashAbTest,
    TiflashCdcAbTest,
}

impl TopologyKind {
    /// Kinds built from two independently configured databases
    pub fn is_paired(&self) -> bool {
        matches!(
            self,
            TopologyKind::AbTest | TopologyKind::TiflashAbTest | TopologyKind::TiflashCdcAbTest
        )
    }

    /// Longest suffix the builder of this kind appends to the base name
    pub fn longest_name_suffix(&self) -> &'static str {
        match self {
            TopologyKind::Default | TopologyKind::Tiflash => "",
            TopologyKind::AbTest | TopologyKind::TiflashAbTest => "-a",
            TopologyKind::Cdc | TopologyKind::Binlog | TopologyKind::TiflashCdcAbTest => {
                "-downstream"
            }
        }
    }
}

/// Validates `config` and builds the topology its `kind` names.
pub fn build_topology<P>(
    provider: &P,
    config: &TopologyConfig,
) -> Result<Box<dyn Cluster>>
where
    P: ClusterProvider + ?Sized,
{
    let config = config.clone().validate()?;
    let (ns, name) = (config.namespace.as_str(), config.name.as_str());
    info!("building {:?} topology {}/{}", config.kind, ns, name);

    let topology = match config.kind {
        TopologyKind::Default => new_default_cluster(provider, ns, name, &config.database_a),
        TopologyKind::Cdc => new_cdc_cluster(provider, ns, name, &config.database_a),
        TopologyKind::Binlog => {
            new_binlog_cluster(provider, ns, name, &config.database_a, &config.binlog)
        }
        TopologyKind::AbTest => {
            new_ab_test_cluster(provider, ns, name, &config.database_a, &config.database_b)
        }
        TopologyKind::Tiflash => new_tiflash_cluster(provider, ns, name, &config.database_a),
        TopologyKind::TiflashAbTest => {
            new_tiflash_ab_test_cluster(provider, ns, name, &config.database_a, &config.database_b)
        }
        TopologyKind::TiflashCdcAbTest => new_tiflash_cdc_ab_test_cluster(
            provider,
            ns,
            name,
            &config.database_a,
            &config.database_b,
        ),
    };
    Ok(topology)
}

/// A single database cluster
pub fn new_default_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    provider.database(namespace, name, DatabaseSpec::from_config(conf))
}

/// Two databases brought up together, then a CDC relay between them
pub fn new_cdc_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    let upstream = provider.database(
        namespace,
        &format!("{name}-upstream"),
        DatabaseSpec::from_config(conf),
    );
    let downstream = provider.database(
        namespace,
        &format!("{name}-downstream"),
        DatabaseSpec::from_config(conf),
    );

    Box::new(Composite::new(vec![
        Box::new(Group::new(vec![upstream, downstream])) as Box<dyn Cluster>,
        provider.cdc(namespace, name),
    ]))
}

/// Binlog-enabled upstream and a plain downstream, then a drainer between them
pub fn new_binlog_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf: &DatabaseConfig,
    binlog: &BinlogConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    let upstream_spec =
        DatabaseSpec::from_config(conf).with_binlog(PumpSpec::from_config(binlog, conf));
    let upstream = provider.database(namespace, &format!("{name}-upstream"), upstream_spec);
    let downstream = provider.database(
        namespace,
        &format!("{name}-downstream"),
        DatabaseSpec::from_config(conf),
    );

    Box::new(Composite::new(vec![
        Box::new(Group::new(vec![upstream, downstream])) as Box<dyn Cluster>,
        provider.binlog(namespace, name),
    ]))
}

/// Two independent databases compared against each other
pub fn new_ab_test_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf_a: &DatabaseConfig,
    conf_b: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    Box::new(Group::new(vec![
        provider.database(namespace, &format!("{name}-a"), DatabaseSpec::from_config(conf_a)),
        provider.database(namespace, &format!("{name}-b"), DatabaseSpec::from_config(conf_b)),
    ]))
}

/// A database with placement rules enabled, then its TiFlash replica
pub fn new_tiflash_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    let spec = DatabaseSpec::from_config(conf).with_placement_rules(true);
    Box::new(Composite::new(vec![
        provider.database(namespace, name, spec),
        provider.tiflash(namespace, name),
    ]))
}

/// A/B pair where only the "A" side carries a TiFlash replica
pub fn new_tiflash_ab_test_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf_a: &DatabaseConfig,
    conf_b: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    Box::new(Group::new(vec![
        new_tiflash_cluster(provider, namespace, &format!("{name}-a"), conf_a),
        provider.database(namespace, &format!("{name}-b"), DatabaseSpec::from_config(conf_b)),
    ]))
}

/// TiFlash-enabled upstream and a plain downstream, then a CDC relay between them
pub fn new_tiflash_cdc_ab_test_cluster<P>(
    provider: &P,
    namespace: &str,
    name: &str,
    conf_a: &DatabaseConfig,
    conf_b: &DatabaseConfig,
) -> Box<dyn Cluster>
where
    P: ClusterProvider + ?Sized,
{
    let peers = Group::new(vec![
        new_tiflash_cluster(provider, namespace, &format!("{name}-upstream"), conf_a),
        provider.database(
            namespace,
            &format!("{name}-downstream"),
            DatabaseSpec::from_config(conf_b),
        ),
    ]);

    Box::new(Composite::new(vec![
        Box::new(peers) as Box<dyn Cluster>,
        provider.cdc(namespace, name),
    ]))
}
