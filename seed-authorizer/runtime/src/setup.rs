use crate::{
    index::SharedIndex,
    k8s::{self, Client, Resource},
};
use anyhow::{bail, Context, Result};
use kube::runtime::watcher;
use tracing::{info_span, Instrument};

/// Starts watching every Gardener resource from which the graph is built.
///
/// Fails if the API server does not serve one of the resources. The watches are spawned onto the
/// runtime; this does not wait for the initial lists to be indexed.
pub async fn setup<S: 'static>(runtime: &mut kubert::Runtime<S>, index: SharedIndex) -> Result<()> {
    let client = runtime.client();
    ensure_served::<k8s::BackupBucket>(&client).await?;
    ensure_served::<k8s::BackupEntry>(&client).await?;
    ensure_served::<k8s::CloudProfile>(&client).await?;
    ensure_served::<k8s::ControllerInstallation>(&client).await?;
    ensure_served::<k8s::ControllerRegistration>(&client).await?;
    ensure_served::<k8s::ManagedSeed>(&client).await?;
    ensure_served::<k8s::Project>(&client).await?;
    ensure_served::<k8s::SecretBinding>(&client).await?;
    ensure_served::<k8s::Seed>(&client).await?;
    ensure_served::<k8s::Shoot>(&client).await?;

    let buckets = runtime.watch_all::<k8s::BackupBucket>(watcher::Config::default());
    tokio::spawn(
        kubert::index::cluster(index.clone(), buckets).instrument(info_span!("backupbuckets")),
    );

    let entries = runtime.watch_all::<k8s::BackupEntry>(watcher::Config::default());
    tokio::spawn(
        kubert::index::namespaced(index.clone(), entries).instrument(info_span!("backupentries")),
    );

    let profiles = runtime.watch_all::<k8s::CloudProfile>(watcher::Config::default());
    tokio::spawn(
        kubert::index::cluster(index.clone(), profiles).instrument(info_span!("cloudprofiles")),
    );

    let installations =
        runtime.watch_all::<k8s::ControllerInstallation>(watcher::Config::default());
    tokio::spawn(
        kubert::index::cluster(index.clone(), installations)
            .instrument(info_span!("controllerinstallations")),
    );

    let registrations =
        runtime.watch_all::<k8s::ControllerRegistration>(watcher::Config::default());
    tokio::spawn(
        kubert::index::cluster(index.clone(), registrations)
            .instrument(info_span!("controllerregistrations")),
    );

    let managed_seeds = runtime.watch_all::<k8s::ManagedSeed>(watcher::Config::default());
    tokio::spawn(
        kubert::index::namespaced(index.clone(), managed_seeds)
            .instrument(info_span!("managedseeds")),
    );

    let projects = runtime.watch_all::<k8s::Project>(watcher::Config::default());
    tokio::spawn(
        kubert::index::cluster(index.clone(), projects).instrument(info_span!("projects")),
    );

    let bindings = runtime.watch_all::<k8s::SecretBinding>(watcher::Config::default());
    tokio::spawn(
        kubert::index::namespaced(index.clone(), bindings)
            .instrument(info_span!("secretbindings")),
    );

    let seeds = runtime.watch_all::<k8s::Seed>(watcher::Config::default());
    tokio::spawn(kubert::index::cluster(index.clone(), seeds).instrument(info_span!("seeds")));

    let shoots = runtime.watch_all::<k8s::Shoot>(watcher::Config::default());
    tokio::spawn(kubert::index::namespaced(index, shoots).instrument(info_span!("shoots")));

    Ok(())
}

async fn ensure_served<T>(client: &Client) -> Result<()>
where
    T: Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();
    if !api_resource_exists::<T>(client)
        .await
        .with_context(|| format!("failed to discover {}", T::api_version(&dt)))?
    {
        bail!(
            "{}.{} resource kind not found",
            T::plural(&dt),
            T::group(&dt)
        );
    }
    Ok(())
}

async fn api_resource_exists<T>(client: &Client) -> Result<bool, k8s::Error>
where
    T: Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();
    let resources = match client.list_api_group_resources(&T::api_version(&dt)).await {
        Ok(resources) => resources,
        // The group/version is not served at all.
        Err(k8s::Error::Api(rsp)) if rsp.code == 404 => return Ok(false),
        Err(error) => return Err(error),
    };
    Ok(resources.resources.iter().any(|r| r.kind == T::kind(&dt)))
}
