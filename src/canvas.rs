// ============================================================================
// CANVAS (IMMEDIATE MODE RASTERIZER)
// ============================================================================

use crate::polar::{polar, Point};
use crate::render::{Color, RenderTarget, Stroke};

/// Degrees between two consecutive points of a rasterized arc.
const ARC_STEP_DEGREES: f64 = 3.0;

/// An RGBA8 frame, typically the one handed out by `pixels::Pixels::frame_mut`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGB value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 3)
            .map(|px| (px[0], px[1], px[2]))
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in dst.iter_mut().zip(src) {
            *channel = (value * a + *channel as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }

    /// Row and column ranges covering `[min, max]`, clipped to the frame.
    fn clip(&self, min: Point, max: Point) -> Option<(i32, i32, i32, i32)> {
        let min_x = (min.x.floor() as i32).max(0);
        let min_y = (min.y.floor() as i32).max(0);
        let max_x = (max.x.ceil() as i32).min(self.width as i32 - 1);
        let max_y = (max.y.ceil() as i32).min(self.height as i32 - 1);
        (min_x <= max_x && min_y <= max_y).then_some((min_x, min_y, max_x, max_y))
    }

    fn draw_thick_line_aa(&mut self, from: Point, to: Point, stroke: Stroke) {
        let pad = stroke.width.ceil() as f64 + 1.0;
        let Some((min_x, min_y, max_x, max_y)) = self.clip(
            Point::new(from.x.min(to.x) - pad, from.y.min(to.y) - pad),
            Point::new(from.x.max(to.x) + pad, from.y.max(to.y) + pad),
        ) else {
            return;
        };
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;
        let half = stroke.width as f64 / 2.0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 - from.x;
                let py = y as f64 - from.y;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = from.x + t * dx;
                let ly = from.y + t * dy;
                let dist = ((lx - x as f64).powi(2) + (ly - y as f64).powi(2)).sqrt();
                let aa = (1.0 - (dist - half).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, stroke.color, aa as f32);
                }
            }
        }
    }
}

/// Clockwise screen angle of `(dx, dy)` in `[0, 360)`.
fn screen_angle(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees().rem_euclid(360.0)
}

fn in_sweep(angle: f64, start: f64, sweep: f64) -> bool {
    let (start, sweep) = if sweep < 0.0 {
        (start + sweep, -sweep)
    } else {
        (start, sweep)
    };
    sweep >= 360.0 || (angle - start).rem_euclid(360.0) <= sweep
}

/// Point on the circle at a clockwise screen angle.
fn rim_point(center: Point, radius: f64, angle: f64) -> Point {
    polar(center, radius, -angle)
}

impl RenderTarget for Canvas<'_> {
    fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.draw_thick_line_aa(from, to, stroke);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke) {
        let steps = (sweep.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
        let mut prev = rim_point(center, radius, start);
        for i in 1..=steps {
            let angle = start + sweep * i as f64 / steps as f64;
            let next = rim_point(center, radius, angle);
            self.draw_thick_line_aa(prev, next, stroke);
            prev = next;
        }
    }

    fn stroke_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke) {
        self.arc(center, radius, start, sweep, stroke);
        if sweep.abs() < 360.0 {
            self.line(center, rim_point(center, radius, start), stroke);
            self.line(center, rim_point(center, radius, start + sweep), stroke);
        }
    }

    fn fill_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, color: Color) {
        let reach = radius + 1.0;
        let Some((min_x, min_y, max_x, max_y)) = self.clip(
            Point::new(center.x - reach, center.y - reach),
            Point::new(center.x + reach, center.y + reach),
        ) else {
            return;
        };
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - center.x;
                let dy = y as f64 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 && in_sweep(screen_angle(dx, dy), start, sweep) {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = points.iter().fold(
            (Point::new(f64::MAX, f64::MAX), Point::new(f64::MIN, f64::MIN)),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        let Some((min_x, min_y, max_x, max_y)) = self.clip(min, max) else {
            return;
        };
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if contains(points, x as f64, y as f64) {
                    self.set_pixel(x, y, color, 1.0);
                }
            }
        }
    }
}

/// Even-odd point in polygon test.
fn contains(points: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(0xff, 0x00, 0x00);

    #[test]
    fn test_fill_pie_respects_sweep() {
        let mut frame = vec![0u8; 100 * 100 * 4];
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        // 0..90 clockwise on screen is the lower right quadrant.
        canvas.fill_pie(Point::new(50.0, 50.0), 40.0, 0.0, 90.0, RED);

        assert_eq!(canvas.pixel(70, 70), Some((0xff, 0, 0)));
        assert_eq!(canvas.pixel(70, 30), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(30, 70), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(98, 98), Some((0, 0, 0)));
    }

    #[test]
    fn test_fill_pie_wraps_through_zero() {
        let mut frame = vec![0u8; 100 * 100 * 4];
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        canvas.fill_pie(Point::new(50.0, 50.0), 40.0, 315.0, 90.0, RED);

        // Straight right of the center lies at 0 degrees, inside the wrap.
        assert_eq!(canvas.pixel(80, 50), Some((0xff, 0, 0)));
        assert_eq!(canvas.pixel(20, 50), Some((0, 0, 0)));
    }

    #[test]
    fn test_line_and_clear() {
        let mut frame = vec![0u8; 20 * 20 * 4];
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.clear(Color::WHITE);
        assert_eq!(canvas.pixel(0, 0), Some((0xff, 0xff, 0xff)));

        canvas.line(
            Point::new(2.0, 10.0),
            Point::new(17.0, 10.0),
            Stroke::new(Color::BLACK, 2.0),
        );
        assert_eq!(canvas.pixel(10, 10), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(10, 2), Some((0xff, 0xff, 0xff)));
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut frame = vec![0u8; 50 * 50 * 4];
        let mut canvas = Canvas::new(&mut frame, 50, 50);
        canvas.fill_polygon(
            &[Point::new(10.0, 10.0), Point::new(40.0, 10.0), Point::new(25.0, 40.0)],
            RED,
        );
        assert_eq!(canvas.pixel(25, 20), Some((0xff, 0, 0)));
        assert_eq!(canvas.pixel(5, 45), Some((0, 0, 0)));
    }

    #[test]
    fn test_drawing_off_frame_is_clipped() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        let mut canvas = Canvas::new(&mut frame, 10, 10);
        canvas.fill_pie(Point::new(-100.0, -100.0), 5.0, 0.0, 360.0, RED);
        canvas.line(
            Point::new(-50.0, 5.0),
            Point::new(50.0, 5.0),
            Stroke::new(RED, 1.0),
        );
        assert_eq!(canvas.pixel(0, 0), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(5, 5), Some((0xff, 0, 0)));
        assert_eq!(canvas.pixel(10, 5), None);
    }
}
