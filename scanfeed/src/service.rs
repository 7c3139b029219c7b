use crate::{
    broadcaster::Broadcaster,
    channel::{Channel, PreviewItem, ScanItem},
    config::Config,
    dispatcher::Dispatcher,
    ingest::Ingestor,
    queue::queue,
};
use anyhow::Context;
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owns both channel queues and the dispatcher tasks draining them.
#[derive(Debug)]
pub struct Service {
    cancel: CancellationToken,
    dispatchers: Vec<JoinHandle<()>>,
}

impl Service {
    /// Spawns one dispatcher per channel and returns the producer side for ingestion.
    pub fn start(config: &Config, broadcaster: Arc<dyn Broadcaster>) -> (Self, Ingestor) {
        let cancel = CancellationToken::new();
        let (scan_tx, scan_rx) = queue::<ScanItem>(Channel::Scan, config.queue_capacity);
        let (preview_tx, preview_rx) =
            queue::<PreviewItem>(Channel::Preview, config.queue_capacity);

        let dispatchers = vec![
            tokio::spawn(Dispatcher::new(scan_rx, broadcaster.clone()).run(cancel.clone())),
            tokio::spawn(Dispatcher::new(preview_rx, broadcaster).run(cancel.clone())),
        ];

        (
            Self {
                cancel,
                dispatchers,
            },
            Ingestor::new(scan_tx, preview_tx),
        )
    }

    /// Stops both dispatchers once they have delivered what is already queued.
    ///
    /// Call this after the HTTP server has stopped, so no upload that was
    /// answered `200` can miss its dispatcher.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.cancel.cancel();
        try_join_all(self.dispatchers)
            .await
            .context("Dispatcher task failed")?;
        tracing::info!("Service stopped");
        Ok(())
    }
}
