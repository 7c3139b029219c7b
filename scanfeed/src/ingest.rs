use crate::{
    channel::{Channel, PreviewItem, ScanItem},
    queue::{QueueError, QueueSender},
};
use scanfeed_codec::{decode_frame, DecodeError, DecodedFrame};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Producer side of both channel queues. Cheap to clone, one per request.
#[derive(Clone, Debug)]
pub struct Ingestor {
    scan: QueueSender<ScanItem>,
    preview: QueueSender<PreviewItem>,
}

impl Ingestor {
    pub fn new(scan: QueueSender<ScanItem>, preview: QueueSender<PreviewItem>) -> Self {
        Self { scan, preview }
    }

    /// Decodes one upload body and queues it on the channel it belongs to.
    pub fn ingest(&self, body: &[u8]) -> Result<Channel, IngestError> {
        let frame = decode_frame(body)?;
        let channel = Channel::classify(&frame);
        let DecodedFrame {
            image,
            text,
            format,
        } = frame;
        tracing::debug!(%channel, image_bytes = image.len(), %format, "Queueing frame");
        match channel {
            Channel::Scan => self.scan.push(ScanItem {
                image,
                text,
                format,
            })?,
            Channel::Preview => self.preview.push(PreviewItem { image })?,
        }
        Ok(channel)
    }
}
