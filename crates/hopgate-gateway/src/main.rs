use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hopgate_gateway::cli::StoreBackendArg;
use hopgate_gateway::config::seeded_store;
use hopgate_gateway::{App, AppState, Cli, ConfigError, SharedStore};
use hopgate_redirector::{Dispatcher, TokioSpawner};
use hopgate_storage::RedisStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse()?;

    hopgate_telemetry::init(cli.log_format.into())?;

    let redirect_config = cli.redirect_config();
    let audit_config = cli.audit_config()?;
    let seed = cli.seed_entries()?;

    info!(
        listen_addr = %cli.listen_addr,
        store_backend = %cli.store,
        audit_sink = %cli.audit_sink,
        "starting hopgate gateway"
    );
    if redirect_config.fallback_url.is_none() {
        warn!("no fallback url configured, unresolved requests will get a 500");
    }

    let store: SharedStore = match cli.store {
        StoreBackendArg::InMemory => {
            info!(entries = seed.len(), "using in-memory mapping store");
            Arc::new(seeded_store(seed).await?)
        }
        StoreBackendArg::Redis => {
            let redis_url = cli
                .redis_url
                .as_deref()
                .ok_or(ConfigError::MissingRedisUrl)?;
            Arc::new(
                RedisStore::connect(redis_url)
                    .await
                    .context("connecting to the mapping store")?,
            )
        }
    };

    let recorder = audit_config
        .into_recorder(&store)
        .await
        .context("connecting to the audit log store")?;
    let spawner = TokioSpawner::new();
    let dispatcher = Dispatcher::new(store, redirect_config, recorder, spawner.clone())?;
    let app = App::router(AppState::new(dispatcher));

    let listener = tokio::net::TcpListener::bind(cli.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!(pending = spawner.pending(), "draining audit tasks");
    spawner.drain().await;
    info!("gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
