//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use inference_dashboard::config::DashboardConfig;
use inference_dashboard::http::HttpServer;
use inference_dashboard::lifecycle::Shutdown;
use inference_dashboard::routes::RouteTable;
use inference_dashboard::streams::{BrokerError, StreamBroker, StreamDirectory};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A distribution directory containing `views/index.html`.
pub fn dist_with_index(markup: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("views")).unwrap();
    std::fs::write(dir.path().join("views/index.html"), markup).unwrap();
    dir
}

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.task).await;
    }
}

/// Start a gateway serving `routes`.
pub async fn start_gateway(
    config: DashboardConfig,
    routes: RouteTable,
    streams: Arc<StreamDirectory>,
) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, routes, streams).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let task = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestGateway {
        addr,
        shutdown,
        task,
    }
}

/// Broker double returning a fixed set of ids.
pub struct FixedBroker(pub Vec<&'static str>);

impl StreamBroker for FixedBroker {
    fn stream_ids(&self) -> BoxFuture<'_, Result<Vec<String>, BrokerError>> {
        let ids = self.0.iter().map(|s| s.to_string()).collect();
        Box::pin(async move { Ok(ids) })
    }
}
