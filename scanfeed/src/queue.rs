//! Per-channel FIFO between ingestion and the dispatcher that drains it.
//!
//! Any number of [`QueueSender`] clones may push; exactly one
//! [`QueueReceiver`] pops. Pushing never waits: an unbounded queue always has
//! room, and a bounded one makes room by dropping its oldest item.

use crate::channel::Channel;
use async_channel as mpmc;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("{0} queue is closed")]
    Closed(Channel),
}

/// Creates a queue for `channel`, unbounded unless `capacity` is given.
pub fn queue<T>(channel: Channel, capacity: Option<usize>) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = match capacity {
        Some(capacity) => mpmc::bounded(capacity.max(1)),
        None => mpmc::unbounded(),
    };
    (QueueSender { channel, tx }, QueueReceiver { channel, rx })
}

#[derive(Debug)]
pub struct QueueSender<T> {
    channel: Channel,
    tx: mpmc::Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel,
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        match self.tx.force_send(item) {
            Ok(None) => Ok(()),
            Ok(Some(_)) => {
                tracing::warn!(channel = %self.channel, "Queue full, dropped oldest item");
                Ok(())
            }
            Err(_) => Err(QueueError::Closed(self.channel)),
        }
    }

    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }
}

#[derive(Debug)]
pub struct QueueReceiver<T> {
    channel: Channel,
    rx: mpmc::Receiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Waits for the next item. `None` once every sender is gone and the queue is drained.
    pub async fn pop(&self) -> Option<T> {
        self.rx.recv().await.ok()
    }

    pub fn try_pop(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
