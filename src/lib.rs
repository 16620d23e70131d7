//! Shot Polish turns a raw screenshot into a presentation-ready image.
//!
//! A [`StyleState`] describes the background, padding, corner radius, drop shadow, device frame
//! and canvas aspect ratio. The [`Compositor`] records a scale-independent [`DrawList`] from it
//! and a [`RenderBackend`] rasterizes that list at any integer pixel density:
//!
//! - [`Compositor::preview`] renders at 1x and is never watermarked
//! - [`export`] renders at `style.export_scale`, applies the watermark unless the
//!   [`Capability`] grants full access, and encodes a PNG
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod compose;
pub(crate) mod export;
pub(crate) mod frames;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod style;

pub use crate::foundation::core::{
    Affine, BezPath, Edges, PixelSize, Point, Rect, Rgba8Premul, RoundedRect, Size, Vec2,
};
pub use crate::foundation::error::{PolishError, PolishResult};

pub use crate::assets::SourceImage;
pub use crate::assets::slot::AssetSlot;
pub use crate::compose::compositor::Compositor;
pub use crate::export::capability::Capability;
pub use crate::export::pipeline::{ExportedFile, export, export_to};
pub use crate::export::sink::{DirectorySink, ExportSink, InMemorySink};
pub use crate::frames::bitmap::{BitmapFrame, SkinLayer, SkinSpec};
pub use crate::frames::browser::BrowserWindowFrame;
pub use crate::frames::laptop::LaptopFrame;
pub use crate::frames::phone::PhoneFrame;
pub use crate::frames::registry::FrameRegistry;
pub use crate::frames::{FrameContext, FrameRenderer, NoFrame};
pub use crate::layout::geometry::{CanvasGeometry, resolve as resolve_geometry};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::plan::{
    DrawList, DrawOp, GradientStop, Paint, Painter, TextAlign, TextBaseline, TextRun, TextShadow,
    clamp_radius,
};
pub use crate::render::{FrameRGBA, RenderBackend};
pub use crate::style::color::Color;
pub use crate::style::model::{
    AspectRatio, Background, FrameStyle, MeshBlob, PremiumFeature, ShadowStyle, StyleState,
};
pub use crate::style::presets::{GRADIENTS, GradientPreset, MESHES, MeshPreset, SOLID_COLORS};
