use crate::foundation::error::PolishResult;
use crate::render::plan::DrawList;

pub(crate) mod background;
pub(crate) mod cpu;
pub(crate) mod gradient;
pub(crate) mod plan;
pub(crate) mod shadow;
pub(crate) mod text;

/// A rendered raster, RGBA8 row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight (unpremultiplied) alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::foundation::math::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Executes a recorded [`DrawList`] at an integer pixel density.
pub trait RenderBackend {
    /// Rasterize `plan` into a `canvas * scale` frame.
    fn render_plan(&mut self, plan: &DrawList, scale: u32) -> PolishResult<FrameRGBA>;
}
