use std::io::Cursor;

use crate::foundation::error::{PolishError, PolishResult};
use crate::render::FrameRGBA;

/// Encode a rendered frame as a straight-alpha RGBA8 PNG.
pub(crate) fn encode_png(frame: &FrameRGBA) -> PolishResult<Vec<u8>> {
    let rgba = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba).ok_or_else(|| {
        PolishError::serialization(format!(
            "pixel buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| PolishError::serialization(format!("png encode: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
