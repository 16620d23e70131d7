use crate::foundation::core::{Edges, PixelSize, Rect};
use crate::foundation::error::{PolishError, PolishResult};
use crate::foundation::math::round_px;
use crate::style::model::AspectRatio;

/// Canvas layout derived from one image, padding, frame margins and ratio.
///
/// All values are logical pixels. Derived on every render and never cached.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CanvasGeometry {
    pub canvas_w: u32,
    pub canvas_h: u32,
    pub content_w: u32,
    pub content_h: u32,
    /// May be fractional when the slack along an axis is odd.
    pub content_x: f64,
    pub content_y: f64,
    pub image_x: f64,
    pub image_y: f64,
    pub image_w: u32,
    pub image_h: u32,
    pub margins: Edges,
}

impl CanvasGeometry {
    /// Logical canvas size.
    pub fn canvas_size(&self) -> PixelSize {
        PixelSize {
            width: self.canvas_w,
            height: self.canvas_h,
        }
    }

    /// Raster target size at `scale`.
    pub fn device_size(&self, scale: u32) -> PolishResult<PixelSize> {
        let w = self.canvas_w.checked_mul(scale);
        let h = self.canvas_h.checked_mul(scale);
        match (w, h) {
            (Some(w), Some(h)) => PixelSize::new(w, h),
            _ => Err(PolishError::invalid_input(format!(
                "canvas {}x{} at scale {scale} overflows",
                self.canvas_w, self.canvas_h
            ))),
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.canvas_w), f64::from(self.canvas_h))
    }

    /// Image plus frame margins.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.content_x,
            self.content_y,
            self.content_x + f64::from(self.content_w),
            self.content_y + f64::from(self.content_h),
        )
    }

    pub fn image_rect(&self) -> Rect {
        Rect::new(
            self.image_x,
            self.image_y,
            self.image_x + f64::from(self.image_w),
            self.image_y + f64::from(self.image_h),
        )
    }
}

/// Resolve the canvas layout.
///
/// `canvas = content + 2 * padding`; a fixed ratio then grows exactly one axis (rounded
/// half-up) and the content is re-centered. Content never changes size.
pub fn resolve(
    image: PixelSize,
    padding: u32,
    margins: Edges,
    ratio: AspectRatio,
) -> PolishResult<CanvasGeometry> {
    if image.width == 0 || image.height == 0 {
        return Err(PolishError::invalid_input(format!(
            "image dimensions must be > 0 (got {}x{})",
            image.width, image.height
        )));
    }

    let overflow = || PolishError::invalid_input("canvas dimensions overflow");
    let pad2 = padding.checked_mul(2).ok_or_else(overflow)?;
    let content_w = image
        .width
        .checked_add(margins.horizontal())
        .ok_or_else(overflow)?;
    let content_h = image
        .height
        .checked_add(margins.vertical())
        .ok_or_else(overflow)?;
    let mut canvas_w = content_w.checked_add(pad2).ok_or_else(overflow)?;
    let mut canvas_h = content_h.checked_add(pad2).ok_or_else(overflow)?;

    if let Some(rho) = ratio.target() {
        let (cw, ch) = (f64::from(canvas_w), f64::from(canvas_h));
        if cw / ch > rho {
            canvas_h = grow(cw / rho, canvas_h)?;
        } else {
            canvas_w = grow(ch * rho, canvas_w)?;
        }
    }

    let content_x = f64::from(canvas_w - content_w) / 2.0;
    let content_y = f64::from(canvas_h - content_h) / 2.0;

    Ok(CanvasGeometry {
        canvas_w,
        canvas_h,
        content_w,
        content_h,
        content_x,
        content_y,
        image_x: content_x + f64::from(margins.left),
        image_y: content_y + f64::from(margins.top),
        image_w: image.width,
        image_h: image.height,
        margins,
    })
}

// Rounding may land one pixel short of the current size; the axis only ever grows.
fn grow(target: f64, current: u32) -> PolishResult<u32> {
    if !target.is_finite() || target >= f64::from(u32::MAX) {
        return Err(PolishError::invalid_input(
            "aspect ratio yields an unrepresentable canvas",
        ));
    }
    Ok(round_px(target).max(current))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
