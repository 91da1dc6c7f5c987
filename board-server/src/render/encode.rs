//! Image encoding.

use std::io::Cursor;

use image::ImageFormat;

use super::canvas::PixelBuffer;

/// Errors from encoding a pixel buffer.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode a buffer as an 8-bit grayscale PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let mut out = Cursor::new(Vec::new());
    buffer.image().write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
