//! Stream broker access.

use futures_util::future::BoxFuture;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use crate::config::BrokerConfig;

/// Redis set holding the ids of all published streams.
pub const STREAMS_KEY: &str = "streams";

/// Error talking to the stream broker.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("stream broker error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Source of the currently published stream ids.
pub trait StreamBroker: Send + Sync {
    fn stream_ids(&self) -> BoxFuture<'_, Result<Vec<String>, BrokerError>>;
}

/// Broker backed by the Redis set [`STREAMS_KEY`].
///
/// Connects on first use; the connection manager reconnects after
/// failures.
pub struct RedisStreamBroker {
    url: String,
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisStreamBroker {
    pub fn new(config: &BrokerConfig) -> Result<Self, BrokerError> {
        let url = config.url();
        let client = redis::Client::open(url.as_str())?;
        Ok(Self {
            url,
            client,
            connection: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, BrokerError> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                tracing::info!(broker = %self.url, "Connecting to stream broker");
                ConnectionManager::new(self.client.clone()).await
            })
            .await?;
        Ok(manager.clone())
    }
}

impl StreamBroker for RedisStreamBroker {
    fn stream_ids(&self) -> BoxFuture<'_, Result<Vec<String>, BrokerError>> {
        Box::pin(async move {
            let mut conn = self.connection().await?;
            let ids: Vec<String> = conn.smembers(STREAMS_KEY).await?;
            Ok(ids)
        })
    }
}
