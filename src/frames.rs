use crate::foundation::core::{Edges, PixelSize, Rect};
use crate::foundation::error::PolishResult;
use crate::render::plan::Painter;

pub(crate) mod bitmap;
pub(crate) mod browser;
pub(crate) mod laptop;
pub(crate) mod phone;
pub(crate) mod registry;
pub(crate) mod shapes;

/// Geometry and parameters handed to a frame renderer for one render.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// Image plus frame margins, in logical canvas coordinates.
    pub content: Rect,
    /// The screenshot rect inside the content box.
    pub image: Rect,
    /// Address-bar text for frames that show one.
    pub url: Option<&'a str>,
}

/// A device skin drawn around the screenshot.
///
/// Renderers are stateless between renders and shared across threads. `under` runs after
/// the shadow and before the screenshot, `over` runs after the screenshot. Returning an
/// error from a phase discards only that phase's drawing.
pub trait FrameRenderer: Send + Sync {
    /// Insets the frame adds around an image of the given size.
    fn margins(&self, image: PixelSize) -> Edges;

    fn under(&self, _ctx: &FrameContext<'_>, _painter: &mut Painter) -> PolishResult<()> {
        Ok(())
    }

    fn over(&self, _ctx: &FrameContext<'_>, _painter: &mut Painter) -> PolishResult<()> {
        Ok(())
    }
}

/// The `none` frame: zero margins, draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFrame;

impl FrameRenderer for NoFrame {
    fn margins(&self, _image: PixelSize) -> Edges {
        Edges::ZERO
    }
}

#[cfg(test)]
#[path = "../tests/unit/frames/builtin.rs"]
mod tests;
