use crate::{broadcaster::Broadcaster, channel::Channel, event::OutgoingEvent, queue::QueueReceiver};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drains one channel's queue into the broadcaster.
pub struct Dispatcher<T> {
    queue: QueueReceiver<T>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl<T> Dispatcher<T>
where
    T: Into<OutgoingEvent> + Send + 'static,
{
    pub fn new(queue: QueueReceiver<T>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { queue, broadcaster }
    }

    /// Runs until `cancel` fires. Items already queued at that point are
    /// still delivered before the loop ends.
    pub async fn run(self, cancel: CancellationToken) {
        let Self { queue, broadcaster } = self;
        let channel = queue.channel();
        tracing::info!(%channel, "Starting dispatcher loop");
        loop {
            tokio::select! {
                biased;
                item = queue.pop() => match item {
                    Some(item) => deliver(channel, broadcaster.as_ref(), item.into()),
                    None => break,
                },
                () = cancel.cancelled() => break,
            }
        }
        tracing::info!(%channel, "Ended dispatcher loop");
    }
}

fn deliver(channel: Channel, broadcaster: &dyn Broadcaster, event: OutgoingEvent) {
    if let Err(e) = broadcaster.emit(&event) {
        tracing::warn!(%channel, "Failed to broadcast event: {e:#}");
    }
}
