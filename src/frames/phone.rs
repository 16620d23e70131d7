use crate::foundation::core::{Edges, PixelSize, Point};
use crate::foundation::error::PolishResult;
use crate::frames::shapes::round_rect;
use crate::frames::{FrameContext, FrameRenderer};
use crate::render::plan::{Paint, Painter};
use crate::style::color::{Color, rgb};

const MARGINS: Edges = Edges::new(60, 18, 60, 18);

/// Phone: rounded body with a dynamic island, side buttons and a home indicator.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhoneFrame;

impl FrameRenderer for PhoneFrame {
    fn margins(&self, _image: PixelSize) -> Edges {
        MARGINS
    }

    fn under(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let c = ctx.content;
        let body = round_rect(c.x0, c.y0, c.width(), c.height(), (c.width() * 0.1).min(36.0));
        painter.fill(
            &body,
            Paint::linear(
                Point::new(c.x0, c.y0),
                Point::new(c.x1, c.y1),
                [
                    (0.0, rgb(0x2a2a2e)),
                    (0.5, rgb(0x1e1e24)),
                    (1.0, rgb(0x2a2a2e)),
                ],
            ),
        );
        painter.stroke(&body, 2.0, rgb(0x3d3d50));
        Ok(())
    }

    fn over(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let c = ctx.content;
        let (w, h) = (c.width(), c.height());

        let island_w = w * 0.28;
        let island_h = 22.0;
        painter.fill(
            &round_rect(
                c.x0 + (w - island_w) / 2.0,
                c.y0 + 18.0,
                island_w,
                island_h,
                island_h / 2.0,
            ),
            rgb(0x0a0a0a),
        );

        let buttons = [
            (c.x1 - 2.0, c.y0 + h * 0.28, 50.0),
            (c.x1 - 2.0, c.y0 + h * 0.42, 50.0),
            (c.x0 - 2.0, c.y0 + h * 0.32, 60.0),
        ];
        for (bx, by, bh) in buttons {
            let button = round_rect(bx, by, 4.0, bh, 2.0);
            painter.fill(&button, rgb(0x1a1a1e));
            painter.stroke(&button, 0.5, rgb(0x3d3d50));
        }

        let bar_w = w * 0.35;
        painter.fill(
            &round_rect(c.x0 + (w - bar_w) / 2.0, c.y1 - 16.0, bar_w, 4.0, 2.0),
            Color::rgba(1.0, 1.0, 1.0, 0.3),
        );

        painter.stroke(
            &round_rect(
                c.x0 + f64::from(MARGINS.left),
                c.y0 + f64::from(MARGINS.top),
                w - f64::from(MARGINS.horizontal()),
                h - f64::from(MARGINS.vertical()),
                8.0,
            ),
            1.0,
            Color::rgba(1.0, 1.0, 1.0, 0.05),
        );
        Ok(())
    }
}
