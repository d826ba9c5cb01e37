//! Procedural digit glyphs built from arcs and line segments.
//!
//! Every point of a recipe is taken relative to the glyph anchor through
//! [`polar`], with the glyph rotation subtracted from the recipe angle, so the
//! digit turns with the slice it labels. Arc start angles use the clockwise
//! convention of [`RenderTarget::arc`] and get the rotation added instead.

use crate::polar::{polar, Point};
use crate::render::{RenderTarget, Stroke};

/// Size tier of a glyph. Wheels with many sectors use the compact tier so
/// that neighbouring labels do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSize {
    Compact,
    Large,
}

impl GlyphSize {
    pub const fn scale(self) -> f64 {
        match self {
            GlyphSize::Compact => 1.0,
            GlyphSize::Large => 2.0,
        }
    }
}

struct GlyphPen<'a> {
    target: &'a mut dyn RenderTarget,
    rotation: f64,
    scale: f64,
    stroke: Stroke,
}

impl GlyphPen<'_> {
    fn at(&self, from: Point, length: f64, angle: f64) -> Point {
        polar(from, length * self.scale, angle - self.rotation)
    }

    fn line(&mut self, from: Point, to: Point) {
        self.target.line(from, to, self.stroke);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, sweep: f64) {
        self.target.arc(
            center,
            radius * self.scale,
            start + self.rotation,
            sweep,
            self.stroke,
        );
    }
}

type GlyphFn = fn(&mut GlyphPen<'_>, Point);

const DIGITS: [GlyphFn; 10] = [
    draw_0, draw_1, draw_2, draw_3, draw_4, draw_5, draw_6, draw_7, draw_8, draw_9,
];

/// Draws `c` centered at `center`, turned by `rotation` degrees.
///
/// Returns `false` without drawing anything when `c` is not an ASCII digit.
pub fn draw_char(
    target: &mut dyn RenderTarget,
    c: char,
    center: Point,
    rotation: f64,
    size: GlyphSize,
    stroke: Stroke,
) -> bool {
    let Some(digit) = c.to_digit(10) else {
        return false;
    };
    let mut pen = GlyphPen {
        target,
        rotation,
        scale: size.scale(),
        stroke,
    };
    DIGITS[digit as usize](&mut pen, center);
    true
}

fn draw_0(pen: &mut GlyphPen<'_>, c: Point) {
    pen.arc(c, 10.0, 0.0, 360.0);
}

fn draw_1(pen: &mut GlyphPen<'_>, c: Point) {
    let top = pen.at(c, 10.0, 90.0);
    let bottom = pen.at(c, 10.0, 270.0);
    let tip = pen.at(top, 7.0, 225.0);
    let foot_left = pen.at(bottom, 7.0, 180.0);
    let foot_right = pen.at(bottom, 7.0, 0.0);

    pen.line(tip, top);
    pen.line(top, bottom);
    pen.line(foot_left, foot_right);
}

fn draw_2(pen: &mut GlyphPen<'_>, c: Point) {
    let top_right = pen.at(c, 10.0, 45.0);
    let bottom_left = pen.at(c, 10.0, 225.0);
    let bottom_right = pen.at(bottom_left, 15.0, 0.0);
    let hook = pen.at(top_right, 7.0, 180.0);

    pen.line(bottom_left, top_right);
    pen.line(bottom_left, bottom_right);
    pen.arc(hook, 7.0, 180.0, 180.0);
}

fn draw_3(pen: &mut GlyphPen<'_>, c: Point) {
    let upper = pen.at(c, 7.0, 90.0);
    let lower = pen.at(c, 7.0, 270.0);

    pen.arc(upper, 7.0, 170.0, 260.0);
    pen.arc(lower, 7.0, 260.0, 260.0);
}

fn draw_4(pen: &mut GlyphPen<'_>, c: Point) {
    let cross = pen.at(c, 3.0, 315.0);
    let bottom = pen.at(cross, 8.0, 270.0);
    let right = pen.at(cross, 8.0, 0.0);
    let top = pen.at(cross, 15.0, 90.0);
    let left = pen.at(cross, 15.0, 180.0);

    pen.line(bottom, top);
    pen.line(left, top);
    pen.line(left, right);
}

fn draw_5(pen: &mut GlyphPen<'_>, c: Point) {
    let middle_left = pen.at(c, 3.0, 135.0);
    let top_left = pen.at(middle_left, 11.0, 80.0);
    let top_right = pen.at(top_left, 12.0, 0.0);
    let belly = pen.at(c, 5.0, 270.0);

    pen.line(top_left, top_right);
    pen.line(middle_left, top_left);
    pen.arc(belly, 8.0, 245.0, 250.0);
}

fn draw_6(pen: &mut GlyphPen<'_>, c: Point) {
    let left = pen.at(c, 7.0, 180.0);
    let top = pen.at(left, 20.0, 60.0);
    let loop_center = pen.at(c, 2.0, 270.0);

    pen.line(left, top);
    pen.arc(loop_center, 7.0, 0.0, 360.0);
}

fn draw_7(pen: &mut GlyphPen<'_>, c: Point) {
    let top_left = pen.at(c, 15.0, 135.0);
    let top_right = pen.at(c, 15.0, 45.0);
    let bottom_left = pen.at(top_right, 28.0, 225.0);

    pen.line(top_left, top_right);
    pen.line(top_right, bottom_left);
}

fn draw_8(pen: &mut GlyphPen<'_>, c: Point) {
    let upper = pen.at(c, 7.0, 90.0);
    let lower = pen.at(c, 7.0, 270.0);

    pen.arc(upper, 7.0, 0.0, 360.0);
    pen.arc(lower, 7.0, 0.0, 360.0);
}

fn draw_9(pen: &mut GlyphPen<'_>, c: Point) {
    let right = pen.at(c, 7.0, 0.0);
    let bottom = pen.at(right, 20.0, 240.0);
    let loop_center = pen.at(c, 2.0, 90.0);

    pen.line(right, bottom);
    pen.arc(loop_center, 7.0, 0.0, 360.0);
}
