use bytes::Bytes;
use scanfeed_codec::DecodedFrame;
use std::fmt;

/// Delivery path of a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Something was recognized in the image.
    Scan,
    /// Plain live-view image.
    Preview,
}

impl Channel {
    pub fn classify(frame: &DecodedFrame) -> Self {
        if frame.text.is_empty() {
            Channel::Preview
        } else {
            Channel::Scan
        }
    }

    /// Event name viewers see for this channel.
    pub fn event_name(&self) -> &'static str {
        match self {
            Channel::Scan => "scan",
            Channel::Preview => "prev",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanItem {
    pub image: Bytes,
    pub text: String,
    pub format: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewItem {
    pub image: Bytes,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_means_scan() {
        let frame = DecodedFrame::new(&b"\xff\xd8"[..], "ABC123", "QR");
        assert_eq!(Channel::classify(&frame), Channel::Scan);
    }

    #[test]
    fn no_text_means_preview() {
        let frame = DecodedFrame::new(&b"\x89PNG"[..], "", "QR");
        assert_eq!(Channel::classify(&frame), Channel::Preview);
        assert_eq!(
            Channel::classify(&DecodedFrame::preview(Bytes::new())),
            Channel::Preview
        );
    }

    #[test]
    fn whitespace_is_still_text() {
        let frame = DecodedFrame::new(Bytes::new(), " ", "");
        assert_eq!(Channel::classify(&frame), Channel::Scan);
    }
}
