//! Drawing sink and the terminal canvas behind it.

use crate::kinematics::Coordinate;
use crate::palette::Rgb;
use std::io::{self, Write};

/// The two primitives the simulation draws with.
pub trait Surface {
    fn fill_circle(&mut self, center: Coordinate, radius: f32, color: Rgb);
    fn draw_line(&mut self, from: Coordinate, to: Coordinate, color: Rgb);
}

/// Pixel buffer drawn as half blocks: every terminal cell holds two vertically
/// stacked pixels, the top one as background color and the bottom one as the
/// foreground of `▄`.
pub struct Canvas {
    width: usize,
    height: usize,
    scale_x: f32,
    scale_y: f32,
    background: Rgb,
    pixels: Vec<Rgb>,
    output_buf: Vec<u8>,
}

impl Canvas {
    /// A canvas for a `cols` x `rows` terminal showing a world of
    /// `world_width` x `world_height` units.
    pub fn new(
        cols: usize,
        rows: usize,
        world_width: f32,
        world_height: f32,
        background: Rgb,
    ) -> Self {
        let width = cols.max(1);
        let height = rows.max(1) * 2;
        Self {
            width,
            height,
            scale_x: width as f32 / world_width,
            scale_y: height as f32 / world_height,
            background,
            pixels: vec![background; width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// World position under the center of the terminal cell at `column`, `row`.
    pub fn to_world(&self, column: u16, row: u16) -> Coordinate {
        // Clicks land on a whole cell, i.e. two pixels.
        Coordinate {
            x: (column as f32 + 0.5) / self.scale_x,
            y: (row as f32 * 2.0 + 1.0) / self.scale_y,
        }
    }

    fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.pixels[idx] = color;
        }
    }

    /// Write the frame, optionally with `overlay` text in the top-left corner.
    pub fn present<W: Write>(&mut self, out: &mut W, overlay: Option<&str>) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixels[y * self.width + x];
                let bot = if y + 1 < self.height {
                    self.pixels[(y + 1) * self.width + x]
                } else {
                    top
                };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        if let Some(text) = overlay {
            write!(self.output_buf, "\x1b[H\x1b[1;33m{}\x1b[0m", text)?;
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

impl Surface for Canvas {
    fn fill_circle(&mut self, center: Coordinate, radius: f32, color: Rgb) {
        let cx = center.x * self.scale_x;
        let cy = center.y * self.scale_y;
        let rx = radius * self.scale_x;
        let ry = radius * self.scale_y;

        let x0 = (cx - rx).floor() as i64;
        let x1 = (cx + rx).ceil() as i64;
        let y0 = (cy - ry).floor() as i64;
        let y1 = (cy + ry).ceil() as i64;

        let mut hit = false;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set(px, py, color);
                    hit = true;
                }
            }
        }

        // Sub-pixel circles still light the pixel they sit in.
        if !hit {
            self.set(cx.floor() as i64, cy.floor() as i64, color);
        }
    }

    fn draw_line(&mut self, from: Coordinate, to: Coordinate, color: Rgb) {
        let (x0, y0) = (from.x * self.scale_x, from.y * self.scale_y);
        let (x1, y1) = (to.x * self.scale_x, to.y * self.scale_y);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.set(x.floor() as i64, y.floor() as i64, color);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Draw {
        Circle { center: Coordinate, radius: f32, color: Rgb },
        Line { from: Coordinate, to: Coordinate, color: Rgb },
    }

    /// Remembers every primitive it was asked to draw.
    #[derive(Default)]
    pub struct Recorder {
        pub draws: Vec<Draw>,
    }

    impl Recorder {
        pub fn circles(&self) -> impl Iterator<Item = (Coordinate, f32, Rgb)> + '_ {
            self.draws.iter().filter_map(|d| match *d {
                Draw::Circle { center, radius, color } => Some((center, radius, color)),
                Draw::Line { .. } => None,
            })
        }
    }

    impl Surface for Recorder {
        fn fill_circle(&mut self, center: Coordinate, radius: f32, color: Rgb) {
            self.draws.push(Draw::Circle { center, radius, color });
        }

        fn draw_line(&mut self, from: Coordinate, to: Coordinate, color: Rgb) {
            self.draws.push(Draw::Line { from, to, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = (0, 0, 0);
    const RED: Rgb = (255, 0, 0);

    fn lit(canvas: &Canvas) -> usize {
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(BG))
            .count()
    }

    #[test]
    fn rows_hold_two_pixels() {
        let canvas = Canvas::new(80, 24, 400.0, 600.0, BG);
        assert_eq!(canvas.width(), 80);
        assert_eq!(canvas.height(), 48);
    }

    #[test]
    fn tiny_circle_lights_its_pixel() {
        // 5 world units per pixel horizontally, radius 1 is sub-pixel.
        let mut canvas = Canvas::new(80, 24, 400.0, 600.0, BG);
        canvas.fill_circle(Coordinate::new(202.0, 301.0), 1.0, RED);
        assert_eq!(canvas.pixel(40, 24), Some(RED));
        assert_eq!(lit(&canvas), 1);
    }

    #[test]
    fn large_circle_covers_an_area() {
        let mut canvas = Canvas::new(40, 30, 40.0, 60.0, BG);
        canvas.fill_circle(Coordinate::new(20.0, 30.0), 5.0, RED);
        assert!(lit(&canvas) > 50);
        assert_eq!(canvas.pixel(20, 30), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(BG));
    }

    #[test]
    fn off_screen_drawing_is_clipped() {
        let mut canvas = Canvas::new(10, 10, 10.0, 20.0, BG);
        canvas.fill_circle(Coordinate::new(-50.0, -50.0), 2.0, RED);
        canvas.fill_circle(Coordinate::new(500.0, 500.0), 2.0, RED);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn horizontal_line_spans_the_width() {
        let mut canvas = Canvas::new(20, 10, 400.0, 600.0, BG);
        canvas.draw_line(Coordinate::new(0.0, 590.0), Coordinate::new(399.0, 590.0), RED);
        let row = (590.0 * canvas.height() as f32 / 600.0) as usize;
        assert!((0..20).all(|x| canvas.pixel(x, row) == Some(RED)));
    }

    #[test]
    fn clear_restores_background() {
        let mut canvas = Canvas::new(10, 10, 10.0, 20.0, BG);
        canvas.fill_circle(Coordinate::new(5.0, 5.0), 3.0, RED);
        canvas.clear();
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn click_maps_into_world_space() {
        let canvas = Canvas::new(80, 30, 400.0, 600.0, BG);
        let at = canvas.to_world(40, 15);
        assert!((at.x - 202.5).abs() < 1e-3);
        assert!((at.y - 310.0).abs() < 1e-3);
    }

    #[test]
    fn present_emits_half_blocks_and_overlay() {
        let mut canvas = Canvas::new(3, 2, 3.0, 4.0, BG);
        let mut out = Vec::new();
        canvas.present(&mut out, Some("90")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('▄').count(), 6);
        assert!(text.starts_with("\x1b[H"));
        assert!(text.ends_with("\x1b[H\x1b[1;33m90\x1b[0m"));
    }
}
