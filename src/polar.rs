// ============================================================================
// POLAR GEOMETRY
// ============================================================================

/// A point in screen space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Point reached by walking `length` from `origin` at a counter-clockwise
/// angle given in degrees. The y axis is flipped so that counter-clockwise
/// reads counter-clockwise on screen.
pub fn polar(origin: Point, length: f64, angle: f64) -> Point {
    let radians = angle.to_radians();
    Point {
        x: origin.x + length * radians.cos(),
        y: origin.y - length * radians.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_cardinal_directions() {
        let o = Point::new(100.0, 100.0);
        assert!(close(polar(o, 10.0, 0.0), Point::new(110.0, 100.0)));
        assert!(close(polar(o, 10.0, 90.0), Point::new(100.0, 90.0)));
        assert!(close(polar(o, 10.0, 180.0), Point::new(90.0, 100.0)));
        assert!(close(polar(o, 10.0, 270.0), Point::new(100.0, 110.0)));
    }

    #[test]
    fn test_negative_angles_wrap() {
        let o = Point::default();
        assert!(close(polar(o, 5.0, -90.0), polar(o, 5.0, 270.0)));
        assert!(close(polar(o, 5.0, 405.0), polar(o, 5.0, 45.0)));
    }

    #[test]
    fn test_length_is_preserved() {
        let o = Point::new(-3.0, 7.5);
        for angle in [0.0, 17.0, 123.4, 250.0, 359.9] {
            assert!((polar(o, 42.0, angle).distance(o) - 42.0).abs() < 1e-9);
        }
    }
}
