//! Cached view of the streams published on the broker.
//!
//! # Responsibilities
//! - Periodically sync stream ids from the broker
//! - Log streams as they appear and disappear
//! - Serve snapshots to the HTTP API without touching the broker

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::time;

use crate::observability::metrics;
use crate::streams::broker::{BrokerError, StreamBroker};
use crate::streams::info::StreamInfo;

pub struct StreamDirectory {
    broker: Option<Arc<dyn StreamBroker>>,
    streams: RwLock<BTreeMap<String, StreamInfo>>,
}

impl StreamDirectory {
    pub fn new(broker: Arc<dyn StreamBroker>) -> Self {
        Self {
            broker: Some(broker),
            streams: RwLock::new(BTreeMap::new()),
        }
    }

    /// A directory with no broker; always empty.
    pub fn empty() -> Self {
        Self {
            broker: None,
            streams: RwLock::new(BTreeMap::new()),
        }
    }

    /// Sync the stream set from the broker.
    ///
    /// On error the current set is left untouched.
    pub async fn refresh(&self) -> Result<(), BrokerError> {
        let Some(broker) = &self.broker else {
            return Ok(());
        };
        let ids = broker.stream_ids().await?;

        let mut latest = BTreeMap::new();
        for id in ids {
            match id.parse::<StreamInfo>() {
                Ok(info) => {
                    latest.insert(id, info);
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring stream"),
            }
        }

        let mut current = self.streams.write().await;
        for id in latest.keys().filter(|id| !current.contains_key(*id)) {
            tracing::info!(stream = %id, "Stream added");
        }
        for id in current.keys().filter(|id| !latest.contains_key(*id)) {
            tracing::info!(stream = %id, "Stream removed");
        }
        *current = latest;
        metrics::record_stream_count(current.len());
        Ok(())
    }

    /// Current stream ids, sorted.
    pub async fn snapshot(&self) -> Vec<String> {
        self.streams.read().await.keys().cloned().collect()
    }

    /// Current streams, sorted by id.
    pub async fn streams(&self) -> Vec<StreamInfo> {
        self.streams.read().await.values().cloned().collect()
    }

    /// Refresh every `interval` until shutdown.
    pub async fn run(self: Arc<Self>, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
        if self.broker.is_none() {
            tracing::info!("Stream broker disabled");
            return;
        }

        tracing::info!(interval = ?interval, "Stream monitor starting");
        let mut ticker = time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "Stream refresh failed, keeping last known streams");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Stream monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::BoxFuture;
    use std::sync::Mutex;

    /// Broker double replaying scripted responses; `None` simulates an outage.
    struct ScriptedBroker {
        responses: Mutex<Vec<Option<Vec<&'static str>>>>,
    }

    impl ScriptedBroker {
        fn new(mut responses: Vec<Option<Vec<&'static str>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    impl StreamBroker for ScriptedBroker {
        fn stream_ids(&self) -> BoxFuture<'_, Result<Vec<String>, BrokerError>> {
            let next = self.responses.lock().unwrap().pop().flatten();
            Box::pin(async move {
                match next {
                    Some(ids) => Ok(ids.into_iter().map(String::from).collect()),
                    None => Err(BrokerError::Redis(redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "broker unavailable",
                    )))),
                }
            })
        }
    }

    #[tokio::test]
    async fn test_refresh_tracks_additions_and_removals() {
        let broker = ScriptedBroker::new(vec![
            Some(vec!["cam2:people:infer", "cam1:face:infer"]),
            Some(vec!["cam1:face:infer", "video:car:origin"]),
        ]);
        let directory = StreamDirectory::new(Arc::new(broker));

        directory.refresh().await.unwrap();
        assert_eq!(
            directory.snapshot().await,
            vec!["cam1:face:infer", "cam2:people:infer"]
        );

        directory.refresh().await.unwrap();
        assert_eq!(
            directory.snapshot().await,
            vec!["cam1:face:infer", "video:car:origin"]
        );
        assert_eq!(directory.streams().await[1].category(), "car");
    }

    #[tokio::test]
    async fn test_invalid_ids_are_dropped() {
        let broker = ScriptedBroker::new(vec![Some(vec!["cam1:face:infer", "garbage"])]);
        let directory = StreamDirectory::new(Arc::new(broker));

        directory.refresh().await.unwrap();
        assert_eq!(directory.snapshot().await, vec!["cam1:face:infer"]);
    }

    #[tokio::test]
    async fn test_broker_failure_keeps_last_set() {
        let broker = ScriptedBroker::new(vec![Some(vec!["cam1:face:infer"]), None]);
        let directory = StreamDirectory::new(Arc::new(broker));

        directory.refresh().await.unwrap();
        assert!(directory.refresh().await.is_err());
        assert_eq!(directory.snapshot().await, vec!["cam1:face:infer"]);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let directory = StreamDirectory::empty();
        directory.refresh().await.unwrap();
        assert!(directory.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_monitor_stops_on_shutdown() {
        let broker = ScriptedBroker::new(vec![Some(vec!["cam1:face:infer"])]);
        let directory = Arc::new(StreamDirectory::new(Arc::new(broker)));
        let (tx, rx) = broadcast::channel(1);

        let task = tokio::spawn(directory.clone().run(Duration::from_millis(10), rx));
        time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();
        task.await.unwrap();

        assert_eq!(directory.snapshot().await, vec!["cam1:face:infer"]);
    }
}
