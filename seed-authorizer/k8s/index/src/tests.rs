use super::*;
use kubert::index::{IndexClusterResource, IndexNamespacedResource};
use maplit::btreeset;
use seed_authorizer_core::{
    attributes::{Attributes, Request, ResourceAttributes, UserInfo},
    Authorizer, Decision, Reachability,
};
use seed_authorizer_k8s_api::{
    garden::{BackupBucketSpec, BackupEntrySpec, SeedSpec, ShootSpec},
    BackupBucket, BackupEntry, ObjectMeta, OwnerReference, Seed, Shoot,
};
use std::collections::BTreeSet;
use tracing::Level;

mod managed_seeds;

struct TestConfig {
    index: SharedIndex,
    reader: Reader,
}

// === impl TestConfig ===

impl Default for TestConfig {
    fn default() -> Self {
        tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .try_init()
            .ok();

        let (reader, index) = Index::new(&mut Registry::default());
        Self { index, reader }
    }
}

impl TestConfig {
    fn apply<T>(&self, obj: T)
    where
        Index: IndexNamespacedResource<T>,
    {
        IndexNamespacedResource::apply(&mut *self.index.write(), obj);
    }

    fn delete<T>(&self, namespace: &str, name: &str)
    where
        Index: IndexNamespacedResource<T>,
    {
        IndexNamespacedResource::<T>::delete(
            &mut *self.index.write(),
            namespace.to_string(),
            name.to_string(),
        );
    }

    fn apply_cluster<T>(&self, obj: T)
    where
        Index: IndexClusterResource<T>,
    {
        IndexClusterResource::apply(&mut *self.index.write(), obj);
    }

    fn delete_cluster<T>(&self, name: &str)
    where
        Index: IndexClusterResource<T>,
    {
        IndexClusterResource::<T>::delete(&mut *self.index.write(), name.to_string());
    }

    fn edges(&self) -> BTreeSet<(Vertex, Vertex)> {
        self.reader
            .graph()
            .read()
            .edges()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect()
    }

    fn has_path(&self, from: &Vertex, seed: &str) -> bool {
        self.reader.has_path_from(from, &Vertex::seed(seed))
    }
}

fn meta(namespace: Option<&str>, name: &str) -> ObjectMeta {
    ObjectMeta {
        namespace: namespace.map(ToString::to_string),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn secret_ref(namespace: &str, name: &str) -> SecretReference {
    SecretReference {
        namespace: Some(namespace.to_string()),
        name: Some(name.to_string()),
    }
}

fn mk_shoot(ns: &str, name: &str, seed: Option<&str>) -> Shoot {
    Shoot {
        metadata: meta(Some(ns), name),
        spec: ShootSpec {
            seed_name: seed.map(ToString::to_string),
            ..Default::default()
        },
        status: None,
    }
}

fn mk_seed(name: &str, secret: Option<SecretReference>) -> Seed {
    Seed {
        metadata: meta(None, name),
        spec: SeedSpec {
            secret_ref: secret,
            backup: None,
        },
    }
}

fn mk_bucket(name: &str, seed: &str, secret: SecretReference) -> BackupBucket {
    BackupBucket {
        metadata: meta(None, name),
        spec: BackupBucketSpec {
            secret_ref: secret,
            seed_name: Some(seed.to_string()),
        },
        status: None,
    }
}

fn mk_entry(ns: &str, name: &str, bucket: &str, seed: Option<&str>) -> BackupEntry {
    BackupEntry {
        metadata: meta(Some(ns), name),
        spec: BackupEntrySpec {
            bucket_name: bucket.to_string(),
            seed_name: seed.map(ToString::to_string),
        },
    }
}

fn shoot_owner(name: &str) -> OwnerReference {
    OwnerReference {
        api_version: "core.gardener.cloud/v1beta1".to_string(),
        kind: "Shoot".to_string(),
        name: name.to_string(),
        uid: format!("{name}-uid"),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

fn shoot(ns: &str, name: &str) -> Vertex {
    Vertex::new(VertexKind::Shoot, ns, name)
}

fn secret(ns: &str, name: &str) -> Vertex {
    Vertex::new(VertexKind::Secret, ns, name)
}

fn bucket(name: &str) -> Vertex {
    Vertex::cluster(VertexKind::BackupBucket, name)
}

fn entry(ns: &str, name: &str) -> Vertex {
    Vertex::new(VertexKind::BackupEntry, ns, name)
}

fn seed_request(seed: &str, verb: &str, resource: &str, ns: &str, name: &str) -> Attributes {
    Attributes {
        user: UserInfo {
            name: format!("gardener.cloud:system:seed:{seed}"),
            groups: vec!["gardener.cloud:system:seeds".to_string()],
            ..Default::default()
        },
        request: Request::Resource(ResourceAttributes {
            verb: verb.to_string(),
            api_group: "core.gardener.cloud".to_string(),
            api_version: "v1beta1".to_string(),
            resource: resource.to_string(),
            namespace: ns.to_string(),
            name: name.to_string(),
            ..Default::default()
        }),
    }
}

/// Authorizes updates to a backup entry against the graph built from watch events.
#[test]
fn backup_entry_authorization() {
    let test = TestConfig::default();
    let authz = Authorizer::new(test.reader.clone());

    test.apply_cluster(mk_bucket(
        "test-bucket",
        "seed-1",
        secret_ref("garden", "backup-creds"),
    ));
    test.apply(mk_entry(
        "shoot--foo--bar",
        "shoot--foo--bar--uid",
        "test-bucket",
        None,
    ));

    let update = seed_request(
        "seed-1",
        "update",
        "backupentries",
        "shoot--foo--bar",
        "shoot--foo--bar--uid",
    );
    assert_eq!(authz.authorize(&update), Decision::Allow);

    // An entry may also be related to its seed directly.
    test.apply(mk_entry(
        "shoot--foo--bar",
        "shoot--foo--bar--uid",
        "test-bucket",
        Some("seed-1"),
    ));
    assert!(test.has_path(
        &entry("shoot--foo--bar", "shoot--foo--bar--uid"),
        "seed-1"
    ));
    assert_eq!(authz.authorize(&update), Decision::Allow);

    // An entry scheduled to another seed is not reachable through the bucket's seed.
    test.apply(mk_entry(
        "shoot--foo--bar",
        "other",
        "other-bucket",
        Some("seed-2"),
    ));
    let decision = authz.authorize(&seed_request(
        "seed-1",
        "update",
        "backupentries",
        "shoot--foo--bar",
        "other",
    ));
    assert_eq!(
        decision.reason(),
        "no relationship found between seed 'seed-1' and this object"
    );

    // Callers that are not seeds are never considered.
    let mut anonymous = update.clone();
    anonymous.user = UserInfo {
        name: "system:anonymous".to_string(),
        ..Default::default()
    };
    assert_eq!(authz.authorize(&anonymous).reason(), "caller is not a seed");
}

/// The graph depends only on the final set of objects, not the order in which they were observed.
#[test]
fn order_insensitive() {
    let forward = TestConfig::default();
    forward.apply_cluster(mk_seed("seed-1", Some(secret_ref("garden", "seed-1"))));
    forward.apply_cluster(mk_bucket("bucket", "seed-1", secret_ref("garden", "creds")));
    forward.apply(mk_entry("shoot--dev--foo", "foo", "bucket", None));
    forward.apply(mk_shoot("garden-dev", "foo", Some("seed-1")));

    let reverse = TestConfig::default();
    reverse.apply(mk_shoot("garden-dev", "foo", Some("seed-1")));
    reverse.apply(mk_entry("shoot--dev--foo", "foo", "bucket", None));
    reverse.apply_cluster(mk_bucket("bucket", "seed-1", secret_ref("garden", "creds")));
    reverse.apply_cluster(mk_seed("seed-1", Some(secret_ref("garden", "seed-1"))));

    assert_eq!(forward.edges(), reverse.edges());
    assert!(reverse.has_path(&entry("shoot--dev--foo", "foo"), "seed-1"));
}

/// Replaying the same event leaves the graph unchanged.
#[test]
fn replay_is_idempotent() {
    let test = TestConfig::default();
    let mut obj = mk_shoot("garden-dev", "foo", Some("seed-1"));
    obj.spec.secret_binding_name = Some("creds".to_string());

    test.apply(obj.clone());
    let edges = test.edges();
    let vertices = test.reader.graph().read().vertex_count();

    test.apply(obj);
    assert_eq!(test.edges(), edges);
    assert_eq!(test.reader.graph().read().vertex_count(), vertices);
}

/// An unchanged object does not require the graph's write lock.
#[test]
fn unchanged_updates_are_elided() {
    let test = TestConfig::default();
    let obj = mk_shoot("garden-dev", "foo", Some("seed-1"));
    test.apply(obj.clone());

    let graph = test.reader.graph().clone();
    let reading = graph.read();
    // This would deadlock if the update tried to take the write lock.
    test.apply(obj);
    drop(reading);

    assert!(test.has_path(&shoot("garden-dev", "foo"), "seed-1"));
}

/// Lookups observe each update either entirely or not at all.
#[test]
fn lookups_observe_whole_updates() {
    let test = TestConfig::default();
    let vertex = entry("shoot--dev--foo", "foo");
    test.apply(mk_entry("shoot--dev--foo", "foo", "bucket", Some("seed-1")));

    std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..5000 {
                let seed = if i % 2 == 0 { "seed-2" } else { "seed-1" };
                test.apply(mk_entry("shoot--dev--foo", "foo", "bucket", Some(seed)));
            }
        });

        for _ in 0..5000 {
            let graph = test.reader.graph().read();
            let seed_1 = graph.has_path_from(&vertex, &Vertex::seed("seed-1"));
            let seed_2 = graph.has_path_from(&vertex, &Vertex::seed("seed-2"));
            assert_ne!(seed_1, seed_2, "exactly one seed must be reachable");
        }
    });
}

/// Deleting an object removes its vertex and all incident edges, including those derived from
/// other objects.
#[test]
fn delete_removes_incident_edges() {
    let test = TestConfig::default();
    test.apply_cluster(mk_bucket("bucket", "seed-1", secret_ref("garden", "creds")));
    test.apply(mk_entry("shoot--dev--foo", "foo", "bucket", None));
    assert!(test.has_path(&entry("shoot--dev--foo", "foo"), "seed-1"));

    test.delete_cluster::<BackupBucket>("bucket");
    assert!(!test.reader.graph().read().contains(&bucket("bucket")));
    assert!(!test.has_path(&entry("shoot--dev--foo", "foo"), "seed-1"));
    assert!(!test.has_path(&secret("garden", "creds"), "seed-1"));

    // Deleting an unknown object is a no-op.
    test.delete_cluster::<BackupBucket>("bucket");
    test.delete::<Shoot>("garden-dev", "unknown");
    assert!(test.reader.graph().read().contains(&entry("shoot--dev--foo", "foo")));
}

/// A resync calls apply for live objects and delete for removed ones.
#[test]
fn reset() {
    let test = TestConfig::default();
    test.apply(mk_shoot("garden-dev", "foo", Some("seed-1")));
    test.apply(mk_shoot("garden-dev", "bar", Some("seed-1")));

    let mut removed = kubert::index::NamespacedRemoved::default();
    removed
        .entry("garden-dev".to_string())
        .or_default()
        .insert("bar".to_string());
    IndexNamespacedResource::reset(
        &mut *test.index.write(),
        vec![mk_shoot("garden-dev", "foo", Some("seed-2"))],
        removed,
    );

    assert_eq!(
        test.edges()
            .into_iter()
            .filter(|(_, to)| to.kind == VertexKind::Seed)
            .collect::<BTreeSet<_>>(),
        btreeset! { (shoot("garden-dev", "foo"), Vertex::seed("seed-2")) }
    );
    assert!(!test.reader.graph().read().contains(&shoot("garden-dev", "bar")));
}

/// Kinds that derive no edges still have vertices while their objects exist.
#[test]
fn referenced_kinds() {
    use seed_authorizer_k8s_api::{garden::CloudProfileSpec, CloudProfile};

    let test = TestConfig::default();
    let profile = Vertex::cluster(VertexKind::CloudProfile, "aws");

    test.apply_cluster(CloudProfile {
        metadata: meta(None, "aws"),
        spec: CloudProfileSpec::default(),
    });
    assert!(test.reader.graph().read().contains(&profile));

    let mut obj = mk_shoot("garden-dev", "foo", Some("seed-1"));
    obj.spec.cloud_profile_name = Some("aws".to_string());
    test.apply(obj);

    // Re-applying the profile leaves the shoot's edge in place.
    test.apply_cluster(CloudProfile {
        metadata: meta(None, "aws"),
        spec: CloudProfileSpec::default(),
    });
    assert!(test.has_path(&profile, "seed-1"));

    test.delete_cluster::<CloudProfile>("aws");
    assert!(!test.reader.graph().read().contains(&profile));
    assert!(test.has_path(&shoot("garden-dev", "foo"), "seed-1"));
}
