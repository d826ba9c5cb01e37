// ============================================================================
// RENDER TARGET
// ============================================================================
//
// Arc and pie angles are degrees measured clockwise on screen from the +x
// axis. This is the direction `atan2(dy, dx)` produces with y pointing down.
// Polar offsets (see `polar`) are counter-clockwise.

use crate::polar::Point;

/// Color representation for wheel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Pen used for outlines, glyph strokes and arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// The logical drawing calls a wheel frame is made of.
pub trait RenderTarget {
    fn clear(&mut self, color: Color);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Circular arc around `center` starting at `start` and sweeping
    /// clockwise by `sweep` degrees.
    fn arc(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke);

    fn stroke_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke);

    fn fill_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, color: Color);

    fn fill_polygon(&mut self, points: &[Point], color: Color);
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        stroke: Stroke,
    },
    StrokePie {
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        stroke: Stroke,
    },
    FillPie {
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Color,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Color,
    },
}

/// A recorded frame. Drawing into a `Scene` stores the commands so they can
/// be inspected or replayed onto another target later.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn replay(&self, target: &mut dyn RenderTarget) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => target.clear(*color),
                DrawCommand::Line { from, to, stroke } => target.line(*from, *to, *stroke),
                DrawCommand::Arc {
                    center,
                    radius,
                    start,
                    sweep,
                    stroke,
                } => target.arc(*center, *radius, *start, *sweep, *stroke),
                DrawCommand::StrokePie {
                    center,
                    radius,
                    start,
                    sweep,
                    stroke,
                } => target.stroke_pie(*center, *radius, *start, *sweep, *stroke),
                DrawCommand::FillPie {
                    center,
                    radius,
                    start,
                    sweep,
                    color,
                } => target.fill_pie(*center, *radius, *start, *sweep, *color),
                DrawCommand::FillPolygon { points, color } => target.fill_polygon(points, *color),
            }
        }
    }
}

impl RenderTarget for Scene {
    fn clear(&mut self, color: Color) {
        self.add_command(DrawCommand::Clear(color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.add_command(DrawCommand::Line { from, to, stroke });
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke) {
        self.add_command(DrawCommand::Arc {
            center,
            radius,
            start,
            sweep,
            stroke,
        });
    }

    fn stroke_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, stroke: Stroke) {
        self.add_command(DrawCommand::StrokePie {
            center,
            radius,
            start,
            sweep,
            stroke,
        });
    }

    fn fill_pie(&mut self, center: Point, radius: f64, start: f64, sweep: f64, color: Color) {
        self.add_command(DrawCommand::FillPie {
            center,
            radius,
            start,
            sweep,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.add_command(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_records_in_order() {
        let mut scene = Scene::new();
        let pen = Stroke::new(Color::WHITE, 2.0);
        scene.clear(Color::BLACK);
        scene.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), pen);
        scene.fill_pie(Point::new(5.0, 5.0), 4.0, 0.0, 90.0, Color::WHITE);

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.commands()[0], DrawCommand::Clear(Color::BLACK));
        assert!(matches!(scene.commands()[1], DrawCommand::Line { .. }));
        assert!(matches!(scene.commands()[2], DrawCommand::FillPie { sweep, .. } if sweep == 90.0));
    }

    #[test]
    fn test_replay_reproduces_scene() {
        let mut scene = Scene::new();
        let pen = Stroke::new(Color::new(1, 2, 3), 1.5);
        scene.arc(Point::new(3.0, 4.0), 7.0, 180.0, 180.0, pen);
        scene.stroke_pie(Point::new(3.0, 4.0), 7.0, 10.0, 20.0, pen);
        scene.fill_polygon(
            &[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 2.0)],
            Color::WHITE,
        );

        let mut copy = Scene::new();
        scene.replay(&mut copy);
        assert_eq!(copy, scene);
    }
}
