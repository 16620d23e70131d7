use std::sync::Arc;

use kurbo::{Shape, Stroke, StrokeOpts};
use smallvec::SmallVec;

use crate::assets::SourceImage;
use crate::foundation::core::{Affine, BezPath, PixelSize, Point, Rect, RoundedRect, Vec2};
use crate::style::color::Color;
use crate::style::model::Background;

/// Flattening tolerance for recorded shapes, in logical pixels.
pub(crate) const PATH_TOLERANCE: f64 = 0.05;

/// A gradient stop; offsets are in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient along `start -> end`, padded outside the axis.
    Linear {
        start: Point,
        end: Point,
        stops: SmallVec<[GradientStop; 3]>,
    },
}

impl Paint {
    pub fn linear(start: Point, end: Point, stops: impl IntoIterator<Item = (f64, Color)>) -> Self {
        Self::Linear {
            start,
            end,
            stops: stops
                .into_iter()
                .map(|(offset, color)| GradientStop { offset, color })
                .collect(),
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which line of the text box the anchor's y sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    pub color: Color,
    /// Canvas `shadowBlur` semantics: sigma is half of this.
    pub blur: f64,
    pub offset: Vec2,
}

/// A single line of text positioned by an anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub anchor: Point,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Font size in logical pixels.
    pub size: f64,
    pub color: Color,
    pub shadow: Option<TextShadow>,
    /// A backend that cannot draw this run must fail instead of skipping it.
    pub required: bool,
}

/// One recorded drawing operation, in logical canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fills the whole canvas.
    Background(Background),
    /// Blurred rounded-rect shadow: black at `opacity` in `0..=1`, shifted down by `offset_y`.
    Shadow {
        rect: Rect,
        radius: f64,
        blur: f64,
        offset_y: f64,
        opacity: f64,
    },
    Fill {
        path: BezPath,
        paint: Paint,
    },
    /// `image` mapped by `transform` (image pixels -> logical) and clipped to `clip`.
    Image {
        image: Arc<SourceImage>,
        transform: Affine,
        clip: BezPath,
    },
    Text(TextRun),
}

/// Scale-independent recording of one composition.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    /// Logical canvas size.
    pub canvas: PixelSize,
    pub ops: Vec<DrawOp>,
}

/// Clamp a corner radius to what fits in `rect`.
pub fn clamp_radius(radius: f64, rect: Rect) -> f64 {
    let max = rect.width().min(rect.height()).max(0.0) / 2.0;
    if radius.is_finite() {
        radius.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Records draw operations for one phase of a composition.
#[derive(Debug, Default)]
pub struct Painter {
    ops: Vec<DrawOp>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, shape: &impl Shape, paint: impl Into<Paint>) {
        self.ops.push(DrawOp::Fill {
            path: shape.to_path(PATH_TOLERANCE),
            paint: paint.into(),
        });
    }

    /// Stroke centered on the outline; recorded as the stroke's fill outline.
    pub fn stroke(&mut self, shape: &impl Shape, width: f64, paint: impl Into<Paint>) {
        if !(width.is_finite() && width > 0.0) {
            return;
        }
        let path = kurbo::stroke(
            shape.path_elements(PATH_TOLERANCE),
            &Stroke::new(width),
            &StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        self.ops.push(DrawOp::Fill {
            path,
            paint: paint.into(),
        });
    }

    /// Draw `image` stretched to `dest`, clipped to a rounded rect of `radius`.
    pub fn image(&mut self, image: Arc<SourceImage>, dest: Rect, radius: f64) {
        let sx = dest.width() / f64::from(image.width());
        let sy = dest.height() / f64::from(image.height());
        let transform =
            Affine::translate(dest.origin().to_vec2()) * Affine::scale_non_uniform(sx, sy);
        let clip = RoundedRect::from_rect(dest, clamp_radius(radius, dest)).to_path(PATH_TOLERANCE);
        self.ops.push(DrawOp::Image {
            image,
            transform,
            clip,
        });
    }

    pub fn text(&mut self, run: TextRun) {
        self.ops.push(DrawOp::Text(run));
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
