use super::*;
use seed_authorizer_k8s_api::{
    seedmanagement::{ManagedSeedSpec, SeedTemplate, ShootRef},
    ManagedSeed,
};

fn mk_managed_seed(name: &str, shoot: &str, secret: Option<SecretReference>) -> ManagedSeed {
    ManagedSeed {
        metadata: meta(Some("garden"), name),
        spec: ManagedSeedSpec {
            shoot: Some(ShootRef {
                name: shoot.to_string(),
            }),
            seed_template: Some(SeedTemplate {
                spec: SeedSpec {
                    secret_ref: secret,
                    backup: None,
                },
            }),
        },
    }
}

/// A managed seed is related to the seed hosting its shoot.
#[test]
fn managed_seed_path() {
    let test = TestConfig::default();
    test.apply(mk_shoot("garden", "soil", Some("seed-1")));
    test.apply(mk_managed_seed(
        "soil",
        "soil",
        Some(SecretReference {
            name: Some("soil-kubeconfig".to_string()),
            namespace: None,
        }),
    ));

    let managed_seed = Vertex::new(VertexKind::ManagedSeed, "garden", "soil");
    assert!(test.has_path(&managed_seed, "seed-1"));
    assert!(test.has_path(&secret("garden", "soil-kubeconfig"), "seed-1"));
    assert!(!test.has_path(&managed_seed, "seed-2"));

    // Managed seeds derive all of their edges, so updates replace the vertex.
    test.apply(mk_managed_seed("soil", "other", None));
    assert!(!test.has_path(&managed_seed, "seed-1"));
    assert!(!test.has_path(&secret("garden", "soil-kubeconfig"), "seed-1"));

    test.delete::<ManagedSeed>("garden", "soil");
    assert!(!test.reader.graph().read().contains(&managed_seed));

    // The shoot's own edges are unaffected.
    assert!(test.has_path(&shoot("garden", "soil"), "seed-1"));
}

#[test]
fn projects() {
    use seed_authorizer_k8s_api::{garden::ProjectSpec, Project};

    let test = TestConfig::default();
    let project = Vertex::cluster(VertexKind::Project, "dev");
    let namespace = Vertex::cluster(VertexKind::Namespace, "garden-dev");

    test.apply_cluster(Project {
        metadata: meta(None, "dev"),
        spec: ProjectSpec {
            namespace: Some("garden-dev".to_string()),
        },
    });
    test.apply(mk_shoot("garden-dev", "foo", Some("seed-1")));
    assert!(test.has_path(&project, "seed-1"));

    // Updating a project does not detach the namespace's shoots.
    test.apply_cluster(Project {
        metadata: meta(None, "dev"),
        spec: ProjectSpec { namespace: None },
    });
    assert!(!test.has_path(&project, "seed-1"));
    assert!(test.has_path(&namespace, "seed-1"));
}
