use crate::glyph::{self, GlyphSize};
use crate::polar::{polar, Point};
use crate::render::{Color, RenderTarget, Stroke};

/// Clockwise screen angle of 12 o'clock, where sector 0 starts.
pub(crate) const TOP_ANGLE: f64 = 270.0;

/// How the characters of a label are laid out along the slice radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Radial distance between consecutive characters.
    pub spacing: f64,
    pub size: GlyphSize,
}

/// Where one character of a label lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub c: char,
    pub center: Point,
    pub rotation: f64,
    pub size: GlyphSize,
}

/// One pie slice of the wheel.
#[derive(Debug, Clone)]
pub struct Sector {
    index: usize,
    label: String,
    angular_width: f64,
    offset_angle: f64,
    fill: Color,
    base_fill: Color,
}

/// Adds `delta` to an offset and wraps it back into `[0, 360)`.
///
/// The visible engine and the outcome simulation both go through this, so
/// the two accumulate the reference offset identically.
pub(crate) fn wrap_offset(offset: f64, delta: f64) -> f64 {
    (offset + delta).rem_euclid(360.0)
}

impl Sector {
    pub fn new(index: usize, label: impl Into<String>, angular_width: f64, fill: Color) -> Self {
        Self {
            index,
            label: label.into(),
            angular_width,
            offset_angle: initial_offset(index, angular_width),
            fill,
            base_fill: fill,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn angular_width(&self) -> f64 {
        self.angular_width
    }

    /// Leading edge, clockwise on screen, in `[0, 360)`.
    pub fn offset_angle(&self) -> f64 {
        self.offset_angle
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn base_fill(&self) -> Color {
        self.base_fill
    }

    pub(crate) fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    pub(crate) fn restore_fill(&mut self) {
        self.fill = self.base_fill;
    }

    pub(crate) fn rotate(&mut self, delta: f64) {
        self.offset_angle = wrap_offset(self.offset_angle, delta);
    }

    pub fn draw_outline(&self, target: &mut dyn RenderTarget, center: Point, radius: f64, pen: Stroke) {
        target.stroke_pie(center, radius, self.offset_angle, self.angular_width, pen);
    }

    pub fn draw_fill(&self, target: &mut dyn RenderTarget, center: Point, radius: f64) {
        target.fill_pie(center, radius, self.offset_angle, self.angular_width, self.fill);
    }

    /// Counter-clockwise angle of the slice's bisector.
    pub fn center_angle(&self) -> f64 {
        360.0 - (self.offset_angle + self.angular_width / 2.0)
    }

    /// Positions of the label characters, outermost first. Characters that
    /// would reach the wheel center are dropped.
    pub fn glyph_placements(
        &self,
        wheel_center: Point,
        wheel_radius: f64,
        layout: LabelLayout,
    ) -> Vec<GlyphPlacement> {
        let center_angle = self.center_angle();
        let rotation = 90.0 - center_angle;

        self.label
            .chars()
            .zip(1..)
            .map(|(c, k)| (c, wheel_radius - layout.spacing * k as f64))
            .take_while(|(_, distance)| *distance > 0.0)
            .map(|(c, distance)| GlyphPlacement {
                c,
                center: polar(wheel_center, distance, center_angle),
                rotation,
                size: layout.size,
            })
            .collect()
    }

    pub fn draw_label(
        &self,
        target: &mut dyn RenderTarget,
        wheel_center: Point,
        wheel_radius: f64,
        layout: LabelLayout,
        pen: Stroke,
    ) {
        for placement in self.glyph_placements(wheel_center, wheel_radius, layout) {
            glyph::draw_char(
                target,
                placement.c,
                placement.center,
                placement.rotation,
                placement.size,
                pen,
            );
        }
    }
}

fn initial_offset(index: usize, angular_width: f64) -> f64 {
    (TOP_ANGLE + index as f64 * angular_width) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, Scene};

    const LARGE: LabelLayout = LabelLayout {
        spacing: 75.0,
        size: GlyphSize::Large,
    };

    const PEN: Stroke = Stroke::new(Color::WHITE, 3.0);

    #[test]
    fn test_initial_offsets_start_at_top() {
        let width = 360.0 / 4.0;
        let offsets: Vec<f64> = (0..4)
            .map(|i| Sector::new(i, i.to_string(), width, Color::BLACK).offset_angle())
            .collect();
        assert_eq!(offsets, vec![270.0, 0.0, 90.0, 180.0]);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut sector = Sector::new(0, "1", 90.0, Color::BLACK);
        sector.rotate(100.0);
        assert_eq!(sector.offset_angle(), 10.0);
        sector.rotate(15.5);
        assert_eq!(sector.offset_angle(), 25.5);
    }

    #[test]
    fn test_wrap_offset_stays_in_range() {
        assert_eq!(wrap_offset(350.0, 20.0), 10.0);
        assert_eq!(wrap_offset(10.0, -30.0), 340.0);
        assert_eq!(wrap_offset(90.0, -810.0), 0.0);
        assert!((0.0..360.0).contains(&wrap_offset(0.0, -1e-12)));
    }

    #[test]
    fn test_glyph_placements_walk_inwards() {
        let center = Point::new(300.0, 300.0);
        let sector = Sector::new(0, "42", 72.0, Color::BLACK);
        let placements = sector.glyph_placements(center, 280.0, LARGE);

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].c, '4');
        assert_eq!(placements[1].c, '2');
        let d0 = placements[0].center.distance(center);
        let d1 = placements[1].center.distance(center);
        assert!((d0 - 205.0).abs() < 1e-9);
        assert!((d1 - 130.0).abs() < 1e-9);
        assert!(d1 < d0);
    }

    #[test]
    fn test_label_points_along_bisector() {
        // Sector 0 of a four-way wheel spans 270..360 clockwise, the upper
        // right quadrant, so its bisector points up and to the right.
        let center = Point::new(0.0, 0.0);
        let sector = Sector::new(0, "7", 90.0, Color::BLACK);
        assert_eq!(sector.center_angle(), 45.0);

        let placement = sector.glyph_placements(center, 100.0, LARGE)[0];
        assert!(placement.center.x > 0.0);
        assert!(placement.center.y < 0.0);
        assert_eq!(placement.rotation, 45.0);
    }

    #[test]
    fn test_draw_label_emits_glyphs_outermost_first() {
        let center = Point::new(300.0, 300.0);
        let sector = Sector::new(0, "42", 72.0, Color::BLACK);
        let mut scene = Scene::new();
        sector.draw_label(&mut scene, center, 280.0, LARGE, PEN);

        let placements = sector.glyph_placements(center, 280.0, LARGE);
        let mut expected = Scene::new();
        for p in &placements {
            glyph::draw_char(&mut expected, p.c, p.center, p.rotation, p.size, PEN);
        }
        assert_eq!(scene, expected);

        // '4' is three lines, '2' is two lines and an arc.
        let kinds: Vec<bool> = scene
            .commands()
            .iter()
            .map(|cmd| matches!(cmd, DrawCommand::Arc { .. }))
            .collect();
        assert_eq!(kinds, [false, false, false, false, false, true]);
        let DrawCommand::Line { from, .. } = scene.commands()[0] else {
            panic!("expected a stroke of the '4'");
        };
        let DrawCommand::Line { from: second, .. } = scene.commands()[3] else {
            panic!("expected a stroke of the '2'");
        };
        assert!(from.distance(center) > second.distance(center));
    }

    #[test]
    fn test_draw_label_skips_non_digits() {
        let sector = Sector::new(0, "a4b", 30.0, Color::BLACK);
        let mut scene = Scene::new();
        sector.draw_label(&mut scene, Point::new(0.0, 0.0), 300.0, LARGE, PEN);

        // Only the '4' draws: three lines.
        assert_eq!(scene.len(), 3);
        assert!(scene
            .commands()
            .iter()
            .all(|cmd| matches!(cmd, DrawCommand::Line { .. })));
    }

    #[test]
    fn test_long_labels_stop_before_center() {
        let sector = Sector::new(0, "123456", 30.0, Color::BLACK);
        let placements = sector.glyph_placements(Point::default(), 200.0, LARGE);
        assert_eq!(placements.len(), 2);
    }

    #[test]
    fn test_outline_and_fill_cover_slice() {
        let sector = Sector::new(1, "2", 120.0, Color::new(9, 9, 9));
        let mut scene = Scene::new();
        sector.draw_outline(&mut scene, Point::default(), 50.0, PEN);
        sector.draw_fill(&mut scene, Point::default(), 50.0);

        assert_eq!(
            scene.commands()[1],
            DrawCommand::FillPie {
                center: Point::default(),
                radius: 50.0,
                start: 30.0,
                sweep: 120.0,
                color: Color::new(9, 9, 9),
            }
        );
    }
}
