// Result image: the stylized picture returned by the service, decoded
// once so the UI can show what came back before the user saves it.

use image::ImageFormat;
use std::io::Cursor;
use std::sync::Arc;

use crate::error::StylerError;

/// Name the downloaded result is saved under.
pub const DOWNLOAD_FILE_NAME: &str = "styled-image.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl ResultImage {
    /// Decode a payload received from the service. PNG is expected; any
    /// other format the `image` crate can read is re-encoded to PNG so the
    /// download always matches its `.png` name.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, StylerError> {
        let unreadable = |err: image::ImageError| {
            log::warn!("result payload is not an image: {err}");
            StylerError::Transport("Received an unreadable image.".into())
        };
        let img = image::load_from_memory(&bytes).map_err(unreadable)?;
        let bytes = match image::guess_format(&bytes) {
            Ok(ImageFormat::Png) => bytes,
            other => {
                log::debug!("re-encoding {other:?} result as png");
                let mut out = Cursor::new(Vec::new());
                img.write_to(&mut out, ImageFormat::Png).map_err(unreadable)?;
                out.into_inner()
            }
        };
        Ok(ResultImage {
            width: img.width(),
            height: img.height(),
            bytes: bytes.into(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
