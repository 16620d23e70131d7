use std::path::PathBuf;

use serde::Deserialize;

use crate::assets::slot::AssetSlot;
use crate::foundation::core::{Edges, PixelSize, Rect, Size};
use crate::foundation::error::{PolishError, PolishResult};
use crate::foundation::math::round_px;
use crate::frames::{FrameContext, FrameRenderer};
use crate::render::plan::Painter;

/// Which phase a bitmap skin draws in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinLayer {
    /// Behind the screenshot; the skin's screen hole may be opaque.
    Under,
    /// On top of the screenshot; the screen hole must be transparent.
    #[default]
    Over,
}

/// A decorative image with a declared screen hole the screenshot is fitted into.
///
/// The asset is scaled uniformly so the hole's width matches the screenshot width. Until the
/// asset slot settles, both phases report `AssetUnavailable`.
#[derive(Clone, Debug)]
pub struct BitmapFrame {
    asset: AssetSlot,
    asset_size: Size,
    screen: Rect,
    layer: SkinLayer,
}

impl BitmapFrame {
    /// `asset_size` and `screen` are in the asset's own pixel space.
    pub fn new(
        asset: AssetSlot,
        asset_size: Size,
        screen: Rect,
        layer: SkinLayer,
    ) -> PolishResult<Self> {
        let finite = [
            asset_size.width,
            asset_size.height,
            screen.x0,
            screen.y0,
            screen.x1,
            screen.y1,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite || asset_size.width <= 0.0 || asset_size.height <= 0.0 {
            return Err(PolishError::invalid_input(format!(
                "skin '{}' needs a positive finite asset size",
                asset.label()
            )));
        }
        if screen.width() <= 0.0
            || screen.height() <= 0.0
            || screen.x0 < 0.0
            || screen.y0 < 0.0
            || screen.x1 > asset_size.width
            || screen.y1 > asset_size.height
        {
            return Err(PolishError::invalid_input(format!(
                "skin '{}' screen rect must be non-empty and inside the asset",
                asset.label()
            )));
        }
        Ok(Self {
            asset,
            asset_size,
            screen,
            layer,
        })
    }

    pub fn asset(&self) -> &AssetSlot {
        &self.asset
    }

    fn scale_for(&self, image_w: f64) -> f64 {
        image_w / self.screen.width()
    }

    fn draw(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let image = self.asset.get()?;
        let sf = self.scale_for(ctx.image.width());
        let origin = ctx.image.origin() - self.screen.origin().to_vec2() * sf;
        let dest = Rect::from_origin_size(origin, self.asset_size * sf);
        painter.image(image, dest, 0.0);
        Ok(())
    }
}

impl FrameRenderer for BitmapFrame {
    fn margins(&self, image: PixelSize) -> Edges {
        let sf = self.scale_for(f64::from(image.width));
        let left = round_px(self.screen.x0 * sf);
        let top = round_px(self.screen.y0 * sf);
        let right = round_px((self.asset_size.width - self.screen.x1) * sf);
        let bottom = round_px(self.asset_size.height * sf)
            .saturating_sub(top)
            .saturating_sub(image.height);
        Edges::new(top, right, bottom, left)
    }

    fn under(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        match self.layer {
            SkinLayer::Under => self.draw(ctx, painter),
            SkinLayer::Over => Ok(()),
        }
    }

    fn over(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        match self.layer {
            SkinLayer::Over => self.draw(ctx, painter),
            SkinLayer::Under => Ok(()),
        }
    }
}

/// On-disk description of a bitmap skin, as read from a skin JSON file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkinSpec {
    /// Registry key; select it with `{"kind": "skin", "name": ...}`.
    pub name: String,
    /// PNG, JPEG or SVG file. Relative paths resolve against the skin file's directory.
    pub path: PathBuf,
    pub asset_width: f64,
    pub asset_height: f64,
    /// Screen hole as `[x, y, width, height]` in asset pixels.
    pub screen: [f64; 4],
    #[serde(default)]
    pub layer: SkinLayer,
}

impl SkinSpec {
    /// Read a skin description; `path` is made absolute relative to the file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> PolishResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PolishError::invalid_input(format!("read skin JSON '{}': {e}", path.display()))
        })?;
        let mut spec: Self = serde_json::from_slice(&bytes).map_err(|e| {
            PolishError::invalid_input(format!("parse skin JSON '{}': {e}", path.display()))
        })?;
        if spec.path.is_relative()
            && let Some(dir) = path.parent()
        {
            spec.path = dir.join(&spec.path);
        }
        Ok(spec)
    }

    /// Build the frame and start loading its asset in the background.
    ///
    /// Geometry is validated first; nothing is loaded for an invalid skin.
    pub fn load(&self) -> PolishResult<BitmapFrame> {
        let [x, y, w, h] = self.screen;
        let frame = BitmapFrame::new(
            AssetSlot::pending(self.path.display().to_string()),
            Size::new(self.asset_width, self.asset_height),
            Rect::new(x, y, x + w, y + h),
            self.layer,
        )?;
        frame.asset().spawn_load(&self.path);
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/bitmap.rs"]
mod tests;
