use crate::DecodedFrame;
use bytes::BufMut;
use rmpv::Value;
use tokio_util::codec::Encoder;

/// Packs a frame in the layout `decode_frame` reads back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEncoder {
    trailer: Option<u64>,
}

impl FrameEncoder {
    /// Appends `trailer` as a fourth value after every frame.
    pub fn with_trailer(trailer: u64) -> Self {
        Self {
            trailer: Some(trailer),
        }
    }
}

impl Encoder<DecodedFrame> for FrameEncoder {
    type Error = anyhow::Error;

    fn encode(&mut self, item: DecodedFrame, dst: &mut bytes::BytesMut) -> Result<(), Self::Error> {
        let DecodedFrame {
            image,
            text,
            format,
        } = item;
        dst.reserve(image.len() + text.len() + format.len() + 16);
        let mut writer = dst.writer();
        rmpv::encode::write_value(&mut writer, &Value::Binary(image.to_vec()))?;
        rmpv::encode::write_value(&mut writer, &Value::from(text))?;
        rmpv::encode::write_value(&mut writer, &Value::from(format))?;
        if let Some(trailer) = self.trailer {
            rmpv::encode::write_value(&mut writer, &Value::from(trailer))?;
        }
        Ok(())
    }
}
