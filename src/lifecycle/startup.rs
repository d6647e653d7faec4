//! Startup orchestration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::DashboardConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::Shutdown;
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::routes::dashboard_routes;
use crate::streams::{BrokerError, RedisStreamBroker, StreamDirectory};
use crate::views::DistViewLoader;

/// Error during startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Broker(#[from] BrokerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build every subsystem and serve until `shutdown` fires.
pub async fn run(config: DashboardConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The one place the route table is constructed.
    let loader = Arc::new(DistViewLoader::new(&config.dist.root));
    let routes = dashboard_routes(loader);
    tracing::info!(dist = %config.dist.root, routes = routes.len(), "Route table built");

    let streams = if config.broker.enabled {
        let broker = RedisStreamBroker::new(&config.broker)?;
        let directory = Arc::new(StreamDirectory::new(Arc::new(broker)));
        let interval = Duration::from_millis(config.broker.refresh_interval_ms);
        tokio::spawn(directory.clone().run(interval, shutdown.subscribe()));
        directory
    } else {
        Arc::new(StreamDirectory::empty())
    };

    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, routes, streams)?;

    let listener = TcpListener::bind(&bind_address).await?;
    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls).await?;
            server
                .run_tls(listener.into_std()?, rustls, shutdown.subscribe())
                .await?;
        }
        None => server.run(listener, shutdown.subscribe()).await?,
    }

    Ok(())
}
