use std::borrow::Cow;
use std::path::Path;

use crate::foundation::core::Rect;
use crate::render::plan::{TextAlign, TextBaseline, TextRun};

/// Families tried before the generic sans-serif fallback.
const PREFERRED_FAMILIES: &[&str] = &[
    "Inter",
    "Helvetica Neue",
    "Segoe UI",
    "Roboto",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

/// Weight used by the URL bar and the watermark.
const UI_WEIGHT: u16 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Glyphs of one text run, positioned in logical canvas coordinates.
pub(crate) struct ShapedText {
    pub glyphs: Vec<vello_cpu::Glyph>,
    pub font_size: f32,
    pub brush: TextBrush,
    /// Layout box in logical coordinates. Glyph ink may overhang it slightly.
    pub bounds: Rect,
}

struct UiFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Shapes UI text with one sans-serif face picked at construction.
///
/// Without any usable face the engine is inert and [`TextEngine::shape`] returns `None`.
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    face: Option<UiFace>,
}

impl TextEngine {
    pub(crate) fn new(fonts_dir: Option<&Path>, system_fonts: bool) -> Self {
        let mut engine = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            face: None,
        };

        let Some((bytes, index)) = pick_face(fonts_dir, system_fonts) else {
            tracing::debug!("no font faces available; text ops will be skipped");
            return engine;
        };

        let families = engine
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family = match families.first() {
            Some((id, _)) => engine
                .font_ctx
                .collection
                .family_name(*id)
                .map(str::to_owned),
            None => None,
        };
        match family {
            Some(family) => {
                tracing::debug!(%family, "text face selected");
                engine.face = Some(UiFace {
                    family,
                    font: vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(bytes),
                        index,
                    ),
                });
            }
            None => tracing::debug!("selected font face has no family name"),
        }
        engine
    }

    pub(crate) fn is_available(&self) -> bool {
        self.face.is_some()
    }

    pub(crate) fn font(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.face.as_ref().map(|f| &f.font)
    }

    /// Shape `run` and position it around its anchor.
    pub(crate) fn shape(&mut self, run: &TextRun) -> Option<ShapedText> {
        let face = self.face.as_ref()?;
        let size = run.size as f32;
        if run.text.is_empty() || !size.is_finite() || size <= 0.0 {
            return None;
        }
        let [r, g, b, a] = run.color.to_rgba8();
        let brush = TextBrush { r, g, b, a };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &run.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrush> = builder.build(&run.text);
        layout.break_all_lines(None);

        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        let ox = run.anchor.x
            - match run.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => width / 2.0,
                TextAlign::Right => width,
            };
        let oy = run.anchor.y
            - match run.baseline {
                TextBaseline::Middle => height / 2.0,
                TextBaseline::Bottom => height,
            };

        let mut glyphs = Vec::new();
        let mut font_size = size;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                font_size = glyph_run.run().font_size();
                glyphs.extend(glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + ox as f32,
                    y: g.y + oy as f32,
                }));
            }
        }

        Some(ShapedText {
            glyphs,
            font_size,
            brush,
            bounds: Rect::new(ox, oy, ox + width, oy + height),
        })
    }
}

fn pick_face(fonts_dir: Option<&Path>, system_fonts: bool) -> Option<(Vec<u8>, u32)> {
    use usvg::fontdb::{Database, Family, Query, Weight};

    let mut db = Database::new();
    if let Some(dir) = fonts_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    // Faces from an explicit directory win over system fonts.
    let local = db.faces().next().map(|f| f.families.first().map(|(n, _)| n.clone()));

    if system_fonts {
        db.load_system_fonts();
    }

    let mut names: Vec<String> = local.flatten().into_iter().collect();
    names.extend(PREFERRED_FAMILIES.iter().map(|s| (*s).to_owned()));
    let mut families: Vec<Family<'_>> = names.iter().map(|n| Family::Name(n)).collect();
    families.push(Family::SansSerif);

    let query = Query {
        families: &families,
        weight: Weight(UI_WEIGHT),
        ..Query::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, index| (data.to_vec(), index))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
