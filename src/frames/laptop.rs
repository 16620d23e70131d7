use crate::foundation::core::{Edges, PixelSize, Point};
use crate::foundation::error::PolishResult;
use crate::frames::shapes::{circle, hline, round_rect};
use crate::frames::{FrameContext, FrameRenderer};
use crate::render::plan::{Paint, Painter};
use crate::style::color::{Color, rgb};

const MARGINS: Edges = Edges::new(36, 24, 54, 24);
const OUTER_RADIUS: f64 = 14.0;
const SCREEN_RADIUS: f64 = 4.0;
const BASE_OVERHANG: f64 = 10.0;

/// Laptop: dark bezel around the screen and a keyboard base below it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaptopFrame;

impl FrameRenderer for LaptopFrame {
    fn margins(&self, _image: PixelSize) -> Edges {
        MARGINS
    }

    fn under(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let c = ctx.content;
        let base_h = f64::from(MARGINS.bottom);

        let bezel = round_rect(c.x0, c.y0, c.width(), c.height() - base_h, OUTER_RADIUS);
        painter.fill(
            &bezel,
            Paint::linear(
                Point::new(c.x0, c.y0),
                Point::new(c.x0, c.y1),
                [(0.0, rgb(0x2a2a2a)), (1.0, rgb(0x1a1a1a))],
            ),
        );
        painter.stroke(&bezel, 1.0, rgb(0x3a3a3a));

        let (bx, by) = (c.x0 - BASE_OVERHANG, c.y1 - base_h);
        let base = round_rect(bx, by, c.width() + 2.0 * BASE_OVERHANG, base_h, 4.0);
        painter.fill(
            &base,
            Paint::linear(
                Point::new(bx, by),
                Point::new(bx, by + base_h),
                [(0.0, rgb(0x2e2e2e)), (1.0, rgb(0x1a1a1a))],
            ),
        );
        painter.stroke(&base, 1.0, rgb(0x3a3a3a));
        Ok(())
    }

    fn over(&self, ctx: &FrameContext<'_>, painter: &mut Painter) -> PolishResult<()> {
        let c = ctx.content;
        let white = |a: f64| Color::rgba(1.0, 1.0, 1.0, a);

        // Camera
        let cam_x = c.x0 + c.width() / 2.0;
        let cam_y = c.y0 + 17.0;
        painter.fill(&circle(cam_x, cam_y, 4.0), rgb(0x111111));
        painter.fill(&circle(cam_x, cam_y, 2.0), rgb(0x2a2a2a));

        let (sx, sy) = (
            c.x0 + f64::from(MARGINS.left),
            c.y0 + f64::from(MARGINS.top),
        );
        let sw = c.width() - f64::from(MARGINS.horizontal());
        let sh = c.height() - f64::from(MARGINS.vertical());
        let screen = round_rect(sx, sy, sw, sh, SCREEN_RADIUS);
        painter.stroke(&screen, 1.0, white(0.08));
        painter.fill(
            &screen,
            Paint::linear(
                Point::new(sx, sy),
                Point::new(sx + sw, sy + sh * 0.4),
                [(0.0, white(0.03)), (1.0, white(0.0))],
            ),
        );

        let base_h = f64::from(MARGINS.bottom);
        let (bx, by) = (c.x0 - BASE_OVERHANG, c.y1 - base_h);
        let bw = c.width() + 2.0 * BASE_OVERHANG;
        painter.stroke(&hline(bx, bx + bw, by), 1.0, white(0.06));

        let tp_w = (bw * 0.3).min(100.0);
        let tp_h = 14.0;
        let trackpad = round_rect(
            bx + (bw - tp_w) / 2.0,
            by + (base_h - tp_h) / 2.0,
            tp_w,
            tp_h,
            4.0,
        );
        painter.fill(&trackpad, rgb(0x262626));
        painter.stroke(&trackpad, 0.5, rgb(0x3a3a3a));
        Ok(())
    }
}
