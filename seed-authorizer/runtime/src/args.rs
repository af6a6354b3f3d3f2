use crate::{core::Authorizer, index::Index, setup, AccessReview, ReviewMetrics};
use anyhow::{bail, Result};
use clap::Parser;
use prometheus_client::registry::Registry;

#[derive(Debug, Parser)]
#[clap(
    name = "seed-authorizer",
    about = "Authorizes requests from gardenlets against the objects related to their seed"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "seed_authorizer=info,warn",
        env = "SEED_AUTHORIZER_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    #[clap(flatten)]
    server: kubert::ServerArgs,

    #[clap(flatten)]
    admin: kubert::AdminArgs,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            admin,
            client,
            log_level,
            log_format,
            server,
        } = self;

        let mut prom = <Registry>::default();
        let reg = prom.sub_registry_with_prefix("seed_authorizer");
        let (reader, index) = Index::new(reg);
        let review_metrics = ReviewMetrics::register(reg);
        let rt_metrics = kubert::RuntimeMetrics::register(prom.sub_registry_with_prefix("kube"));

        let mut runtime = kubert::Runtime::builder()
            .with_log(log_level, log_format)
            .with_metrics(rt_metrics)
            .with_admin(admin.into_builder().with_prometheus(prom))
            .with_client(client)
            .with_server(server)
            .build()
            .await?;

        // Lookups are answered from whatever has been indexed so far; the graph fills in as the
        // initial lists complete.
        setup(&mut runtime, index).await?;

        let authorizer = Authorizer::new(reader);
        let runtime = runtime.spawn_server(AccessReview::new(authorizer, review_metrics));

        // Block the main thread on the shutdown signal. Once it fires, wait for the background tasks to
        // complete before exiting.
        if runtime.run().await.is_err() {
            bail!("Aborted");
        }

        Ok(())
    }
}
