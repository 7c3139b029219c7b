pub mod decoder;
pub mod encoder;
pub mod error;

use bytes::Bytes;

pub use crate::decoder::decode_frame;
pub use crate::encoder::FrameEncoder;
pub use crate::error::{DecodeError, Field};

/// One upload: an image plus whatever the camera recognized in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedFrame {
    pub image: Bytes,
    /// Empty when nothing was recognized.
    pub text: String,
    /// Symbology tag of `text`, e.g. `QR` or `EAN_13`.
    pub format: String,
}

impl DecodedFrame {
    pub fn new(
        image: impl Into<Bytes>,
        text: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            text: text.into(),
            format: format.into(),
        }
    }

    pub fn preview(image: impl Into<Bytes>) -> Self {
        Self::new(image, "", "")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bytes::BytesMut;
    use tokio_util::codec::Encoder;

    #[test]
    fn encoded_frame_decodes_unchanged() {
        let frame = DecodedFrame::new(vec![0xffu8, 0xd8, 0x00, 0x7f], "ABC123", "QR");
        let mut buffer = BytesMut::new();
        FrameEncoder::default()
            .encode(frame.clone(), &mut buffer)
            .unwrap();
        assert_eq!(decode_frame(&buffer).unwrap(), frame);
    }

    #[test]
    fn trailer_is_ignored_on_decode() {
        let frame = DecodedFrame::preview(&b"\x89PNG\r\n"[..]);
        let mut buffer = BytesMut::new();
        FrameEncoder::with_trailer(12)
            .encode(frame.clone(), &mut buffer)
            .unwrap();
        assert_eq!(decode_frame(&buffer).unwrap(), frame);
    }
}
