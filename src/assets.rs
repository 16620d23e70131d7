use std::fmt;
use std::sync::Arc;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{PolishError, PolishResult};

pub(crate) mod decode;
pub(crate) mod slot;

/// A decoded raster: premultiplied RGBA8, row-major, tightly packed.
///
/// Cheap to clone; pixel storage is shared. Never mutated after construction.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap premultiplied pixels, validating dimensions and length.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PolishResult<Self> {
        let size = PixelSize::new(width, height)?;
        if rgba8_premul.len() != size.rgba_len() {
            return Err(PolishError::invalid_input(format!(
                "pixel buffer is {} bytes, expected {} for {width}x{height}",
                rgba8_premul.len(),
                size.rgba_len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Wrap straight-alpha pixels, premultiplying them.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> PolishResult<Self> {
        crate::foundation::math::premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// Decode PNG/JPEG/WebP/... bytes; SVG documents are detected and rasterized at their
    /// intrinsic size.
    pub fn from_encoded(bytes: &[u8]) -> PolishResult<Self> {
        if decode::looks_like_svg(bytes) {
            decode::rasterize_svg(bytes, None)
        } else {
            decode::decode_image(bytes)
        }
    }

    /// Read and decode a file from disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> PolishResult<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
        Self::from_encoded(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SourceImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
                || self.rgba8_premul == other.rgba8_premul)
    }
}

#[cfg(test)]
#[path = "../tests/unit/assets/source.rs"]
mod tests;
