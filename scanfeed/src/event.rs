use crate::channel::{Channel, PreviewItem, ScanItem};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;

/// What viewers receive for one delivered frame.
///
/// Serializes to the viewer wire form `{"event": "scan", "data": {...}}`;
/// [`OutgoingEvent::payload`] is the `data` part alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum OutgoingEvent {
    #[serde(rename = "scan")]
    Scan { img: String, text: String },
    #[serde(rename = "prev")]
    Preview { img: String },
}

impl OutgoingEvent {
    pub fn channel(&self) -> Channel {
        match self {
            OutgoingEvent::Scan { .. } => Channel::Scan,
            OutgoingEvent::Preview { .. } => Channel::Preview,
        }
    }

    pub fn name(&self) -> &'static str {
        self.channel().event_name()
    }

    pub fn payload(&self) -> serde_json::Value {
        match self {
            OutgoingEvent::Scan { img, text } => serde_json::json!({ "img": img, "text": text }),
            OutgoingEvent::Preview { img } => serde_json::json!({ "img": img }),
        }
    }
}

impl From<ScanItem> for OutgoingEvent {
    fn from(ScanItem { image, text, format }: ScanItem) -> Self {
        OutgoingEvent::Scan {
            img: STANDARD.encode(image),
            text: format!("<{format}> {text}"),
        }
    }
}

impl From<PreviewItem> for OutgoingEvent {
    fn from(PreviewItem { image }: PreviewItem) -> Self {
        OutgoingEvent::Preview {
            img: STANDARD.encode(image),
        }
    }
}
