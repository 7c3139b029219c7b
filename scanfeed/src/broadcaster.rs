use crate::event::OutgoingEvent;
use tokio::sync::broadcast;

/// Largest per-viewer buffer a hub will allocate.
pub const MAX_SUBSCRIBER_BUFFER: usize = 1 << 16;

#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Pushes an event to every live viewer.
///
/// Implementations must not block for long: the calling dispatcher delivers
/// nothing else on its channel until `emit` returns.
pub trait Broadcaster: Send + Sync + 'static {
    fn emit(&self, event: &OutgoingEvent) -> Result<(), BroadcastError>;
}

/// Fan-out to viewer sessions over a tokio broadcast channel.
///
/// Each session holds its own receiver with room for `buffer` events; a
/// session that falls further behind skips ahead instead of holding up the
/// dispatcher.
#[derive(Clone, Debug)]
pub struct SubscriberHub {
    tx: broadcast::Sender<OutgoingEvent>,
}

impl SubscriberHub {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.clamp(1, MAX_SUBSCRIBER_BUFFER));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutgoingEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Broadcaster for SubscriberHub {
    fn emit(&self, event: &OutgoingEvent) -> Result<(), BroadcastError> {
        match self.tx.send(event.clone()) {
            Ok(viewers) => tracing::trace!(event = event.name(), viewers, "Broadcast event"),
            Err(_) => tracing::trace!(event = event.name(), "No viewers connected"),
        }
        Ok(())
    }
}
