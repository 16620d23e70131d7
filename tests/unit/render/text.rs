use super::*;
use crate::foundation::core::Point;
use crate::style::color::rgb;

fn run(text: &str, align: TextAlign) -> TextRun {
    TextRun {
        text: text.to_owned(),
        anchor: Point::new(200.0, 100.0),
        align,
        baseline: TextBaseline::Bottom,
        size: 16.0,
        color: rgb(0xffffff),
        shadow: None,
        required: false,
    }
}

#[test]
fn engine_without_fonts_is_inert() {
    let mut engine = TextEngine::new(None, false);
    assert!(!engine.is_available());
    assert!(engine.font().is_none());
    assert!(engine.shape(&run("hello", TextAlign::Left)).is_none());
}

#[test]
fn missing_fonts_dir_is_tolerated() {
    let engine = TextEngine::new(Some(Path::new("/no/such/fonts")), false);
    assert!(!engine.is_available());
}

#[test]
fn alignment_moves_glyphs_relative_to_the_anchor() {
    let mut engine = TextEngine::new(None, true);
    if !engine.is_available() {
        // Host without system fonts.
        return;
    }
    let left = engine.shape(&run("shotpolish.com", TextAlign::Left)).unwrap();
    let right = engine.shape(&run("shotpolish.com", TextAlign::Right)).unwrap();
    assert!(!left.glyphs.is_empty());
    assert!(left.glyphs[0].x >= 199.0);
    let last = right.glyphs.last().unwrap();
    assert!(last.x < 200.0);
    assert!(right.glyphs.iter().all(|g| g.y <= 100.0));
    assert_eq!(left.brush, TextBrush { r: 255, g: 255, b: 255, a: 255 });
    assert!(engine.shape(&run("", TextAlign::Left)).is_none());
}
