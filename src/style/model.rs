use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PolishError, PolishResult};
use crate::style::color::{Color, rgb};

/// Immutable per-render snapshot of every user-facing option.
///
/// This is the JSON-facing representation produced by a UI layer or a config file. Every field
/// has a default, so `{}` is a valid style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleState {
    /// Canvas background.
    pub background: Background,
    /// Space around the content box, in logical pixels.
    pub padding: u32,
    /// Corner radius of the screenshot, in logical pixels.
    pub radius: f64,
    /// Drop shadow behind the screenshot.
    pub shadow: ShadowStyle,
    /// Device chrome around the screenshot.
    pub frame: FrameStyle,
    /// Canvas aspect-ratio constraint.
    pub aspect_ratio: AspectRatio,
    /// Integer pixel density used by the export pipeline.
    pub export_scale: u32,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            background: Background::default(),
            padding: 60,
            radius: 12.0,
            shadow: ShadowStyle::default(),
            frame: FrameStyle::None,
            aspect_ratio: AspectRatio::Auto,
            export_scale: 2,
        }
    }
}

impl StyleState {
    /// Parse a style from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> PolishResult<Self> {
        let style: Self = serde_json::from_reader(r)
            .map_err(|e| PolishError::invalid_input(format!("parse style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Parse a style from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> PolishResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a style from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> PolishResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PolishError::invalid_input(format!("open style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the numeric ranges that serde cannot express.
    pub fn validate(&self) -> PolishResult<()> {
        if self.export_scale == 0 {
            return Err(PolishError::invalid_input("export_scale must be >= 1"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(PolishError::invalid_input(
                "radius must be finite and >= 0",
            ));
        }
        self.shadow.validate()?;
        self.background.validate()?;
        Ok(())
    }

    /// Features reserved for licensed users.
    ///
    /// The export pipeline only consults the capability for the watermark; this report lets a
    /// UI layer decide whether to gate the controls.
    pub fn premium_features(&self) -> Vec<PremiumFeature> {
        let mut out = Vec::new();
        if matches!(self.background, Background::Mesh { .. }) {
            out.push(PremiumFeature::MeshBackground);
        }
        if !matches!(self.frame, FrameStyle::None) {
            out.push(PremiumFeature::DeviceFrame);
        }
        if self.export_scale > 1 {
            out.push(PremiumFeature::HighResolutionExport);
        }
        out
    }
}

/// A feature gated behind full access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFeature {
    /// Multi-blob mesh backgrounds.
    MeshBackground,
    /// Any device frame other than `none`.
    DeviceFrame,
    /// Export scale above 1x.
    HighResolutionExport,
}

/// Canvas background; exactly one kind is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Background {
    /// Two-stop linear gradient rotated around the canvas center.
    Gradient {
        /// Color at offset 0.
        from: Color,
        /// Color at offset 1.
        to: Color,
        /// Axis angle in degrees (0 = left to right, 90 = top to bottom).
        #[serde(default = "default_angle")]
        angle: f64,
    },
    /// Flat fill.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Base fill plus radial blobs painted in list order.
    Mesh {
        /// Base fill.
        base: Color,
        /// Blobs, later entries layer over earlier ones.
        blobs: Vec<MeshBlob>,
    },
    /// Cleared canvas; exported PNGs keep alpha.
    Transparent,
}

fn default_angle() -> f64 {
    135.0
}

impl Default for Background {
    fn default() -> Self {
        Self::Gradient {
            from: rgb(0x06b6d4),
            to: rgb(0x3b82f6),
            angle: 135.0,
        }
    }
}

impl Background {
    fn validate(&self) -> PolishResult<()> {
        match self {
            Self::Gradient { angle, .. } if !angle.is_finite() => {
                Err(PolishError::invalid_input("gradient angle must be finite"))
            }
            Self::Mesh { blobs, .. } => {
                for (i, b) in blobs.iter().enumerate() {
                    if ![b.cx, b.cy, b.r].iter().all(|v| v.is_finite()) || b.r < 0.0 {
                        return Err(PolishError::invalid_input(format!(
                            "mesh blob {i} must have finite cx/cy and r >= 0"
                        )));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// One radial blob of a mesh background, in normalized canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshBlob {
    /// Center x as a fraction of canvas width.
    pub cx: f64,
    /// Center y as a fraction of canvas height.
    pub cy: f64,
    /// Radius as a fraction of `max(width, height)`.
    pub r: f64,
    /// Blob color at the center (before the 80% core alpha).
    pub color: Color,
}

/// Drop shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowStyle {
    /// Whether the shadow pass runs.
    pub enabled: bool,
    /// Blur amount in logical pixels (canvas `shadowBlur` semantics, sigma = blur / 2).
    pub blur: f64,
    /// Vertical offset in logical pixels.
    pub y_offset: f64,
    /// Opacity in percent, `0..=100`.
    pub opacity: f64,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            blur: 40.0,
            y_offset: 16.0,
            opacity: 40.0,
        }
    }
}

impl ShadowStyle {
    fn validate(&self) -> PolishResult<()> {
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(PolishError::invalid_input("shadow blur must be >= 0"));
        }
        if !self.y_offset.is_finite() {
            return Err(PolishError::invalid_input("shadow y_offset must be finite"));
        }
        if !(0.0..=100.0).contains(&self.opacity) {
            return Err(PolishError::invalid_input(
                "shadow opacity must be within 0..=100",
            ));
        }
        Ok(())
    }
}

/// Device chrome selection; exactly one kind is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum FrameStyle {
    /// No chrome, zero margins.
    #[default]
    None,
    /// Browser window with a title bar and an address bar.
    BrowserWindow {
        /// Text shown in the address bar.
        #[serde(default = "default_url")]
        url: String,
    },
    /// Laptop bezel and keyboard base.
    Laptop,
    /// Phone body with a dynamic island.
    Phone,
    /// A bitmap skin registered under `name`.
    Skin {
        /// Registry key of the skin.
        name: String,
    },
}

fn default_url() -> String {
    "https://example.com".to_owned()
}

impl FrameStyle {
    /// Registry key of the renderer that draws this frame.
    pub fn key(&self) -> &str {
        match self {
            Self::None => "none",
            Self::BrowserWindow { .. } => "browser_window",
            Self::Laptop => "laptop",
            Self::Phone => "phone",
            Self::Skin { name } => name,
        }
    }

    /// Address-bar text, when this frame has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::BrowserWindow { url } => Some(url),
            _ => None,
        }
    }
}

/// Canvas aspect-ratio constraint: `"auto"` or `"W:H"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// Canvas follows the content box plus padding.
    #[default]
    Auto,
    /// Canvas grows along one axis to match `w / h`.
    Fixed {
        /// Ratio numerator.
        w: f64,
        /// Ratio denominator.
        h: f64,
    },
}

impl AspectRatio {
    /// Target `w / h`, or `None` for `auto`.
    pub fn target(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Fixed { w, h } => Some(w / h),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = PolishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let bad = || {
            PolishError::invalid_input(format!(
                "aspect ratio must be \"auto\" or \"W:H\" with positive numbers (got \"{s}\")"
            ))
        };
        let (w, h) = s.split_once(':').ok_or_else(bad)?;
        let w: f64 = w.trim().parse().map_err(|_| bad())?;
        let h: f64 = h.trim().parse().map_err(|_| bad())?;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(bad());
        }
        Ok(Self::Fixed { w, h })
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = PolishError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed { w, h } => write!(f, "{w}:{h}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
