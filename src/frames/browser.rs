use crate::foundation::core::{Edges, PixelSize, Point, Rect};
use crate::foundation::error::PolishResult;
use crate::frames::shapes::{circle, hline, round_rect, top_rounded};
use crate::frames::{FrameContext, FrameRenderer};
use crate::render::plan::{Painter, TextAlign, TextBaseline, TextRun};
use crate::style::color::rgb;

const BAR_H: f64 = 42.0;
const WINDOW_RADIUS: f64 = 12.0;
const URL_BAR_H: f64 = 24.0;
const URL_MAX_CHARS: usize = 60;
const DOT_COLORS: [u32; 3] = [0xef4444, 0xf59e0b, 0x22c55e];

/// Dark browser window: title bar with traffic lights and an address bar above the image.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserWindowFrame;

impl FrameRenderer for BrowserWindowFrame {
    fn margins(&self, _image: PixelSize) -> Edges {
        Edges::new(42, 0, 0, 0)
    }

    fn over(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let c = ctx.content;
        let bar = Rect::new(c.x0, c.y0, c.x1, c.y0 + BAR_H.min(c.height()));
        painter.fill(&top_rounded(bar, WINDOW_RADIUS), rgb(0x1e1e2e));

        let dot_y = c.y0 + BAR_H / 2.0;
        for (i, color) in DOT_COLORS.into_iter().enumerate() {
            painter.fill(&circle(c.x0 + 18.0 + 20.0 * i as f64, dot_y, 6.0), rgb(color));
        }

        let url_w = c.width() - 120.0;
        if url_w > 0.0 {
            let url_x = c.x0 + 90.0;
            let url_y = c.y0 + (BAR_H - URL_BAR_H) / 2.0;
            painter.fill(&round_rect(url_x, url_y, url_w, URL_BAR_H, 6.0), rgb(0x2a2a3e));

            let text: String = ctx
                .url
                .unwrap_or("https://example.com")
                .chars()
                .take(URL_MAX_CHARS)
                .collect();
            if !text.is_empty() {
                painter.text(TextRun {
                    text,
                    anchor: Point::new(url_x + url_w / 2.0, url_y + URL_BAR_H / 2.0),
                    align: TextAlign::Center,
                    baseline: TextBaseline::Middle,
                    size: 12.0,
                    color: rgb(0x9090b0),
                    shadow: None,
                    required: false,
                });
            }
        }

        painter.stroke(&hline(c.x0, c.x1, c.y0 + BAR_H), 1.0, rgb(0x2e2e48));
        painter.stroke(
            &round_rect(c.x0, c.y0, c.width(), c.height(), WINDOW_RADIUS),
            1.5,
            rgb(0x3d3d5c),
        );
        Ok(())
    }
}
