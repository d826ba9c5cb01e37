use bon::Builder;
use std::time::Duration;

use crate::glyph::GlyphSize;
use crate::render::{Color, Stroke};
use crate::sector::LabelLayout;

/// Tuning for the wheel engine and the window hosting it.
///
/// ```
/// use fortune_wheel::WheelConfig;
///
/// let config = WheelConfig::builder().slowdown_step(0.25).build();
/// assert_eq!(config.slowdown_step, 0.25);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct WheelConfig {
    // Spin physics
    /// Total rotation of the initial spin is drawn from this half-open
    /// range, in whole degrees.
    #[builder(default = (360, 720))]
    pub rotation_range: (u32, u32),
    /// Rough per-tick rotation during the initial spin.
    #[builder(default = 15)]
    pub approx_initial_rotate: u32,
    /// Amount the per-tick rotation shrinks by while slowing down.
    #[builder(default = 0.15)]
    pub slowdown_step: f64,
    /// Real-time length of one tick. The slowdown step is tuned for this.
    #[builder(default = Duration::from_millis(55))]
    pub tick_interval: Duration,

    // Highlight pulse
    #[builder(default = Color::BLACK)]
    pub highlight_marker: Color,
    #[builder(default = 20)]
    pub highlight_low: u8,
    #[builder(default = 235)]
    pub highlight_high: u8,
    #[builder(default = 15)]
    pub highlight_step: u8,

    // Labels
    /// Wheels with more sectors than this use compact glyphs.
    #[builder(default = 10)]
    pub large_label_max_sectors: usize,
    #[builder(default = 75.0)]
    pub large_label_spacing: f64,
    #[builder(default = 35.0)]
    pub compact_label_spacing: f64,

    // Pens and colors
    #[builder(default = Color::new(0x20, 0x20, 0x20))]
    pub background: Color,
    #[builder(default = Stroke::new(Color::WHITE, 2.0))]
    pub border_pen: Stroke,
    #[builder(default = Stroke::new(Color::WHITE, 3.0))]
    pub label_pen: Stroke,
    #[builder(default = Color::WHITE)]
    pub pointer_color: Color,
    /// Side length of the pointer triangle.
    #[builder(default = 25.0)]
    pub pointer_size: f64,

    // Window
    #[builder(default = "Fortune Wheel".to_string())]
    pub title: String,
    #[builder(default = 640)]
    pub window_width: usize,
    #[builder(default = 620)]
    pub window_height: usize,
    /// Gap between the wheel rim and the window edge.
    #[builder(default = 10)]
    pub wheel_margin: usize,
    #[builder(default = 20)]
    pub max_labels: usize,
    /// Pause between the wheel coming to rest and its winner being announced.
    #[builder(default = Duration::from_millis(2500))]
    pub announce_delay: Duration,
    /// Seed for reproducible spins. Entropy is used when unset.
    pub seed: Option<u64>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WheelConfig {
    pub fn label_layout(&self, sector_count: usize) -> LabelLayout {
        if sector_count <= self.large_label_max_sectors {
            LabelLayout {
                spacing: self.large_label_spacing,
                size: GlyphSize::Large,
            }
        } else {
            LabelLayout {
                spacing: self.compact_label_spacing,
                size: GlyphSize::Compact,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WheelConfig::default();
        assert_eq!(config.rotation_range, (360, 720));
        assert_eq!(config.approx_initial_rotate, 15);
        assert_eq!(config.slowdown_step, 0.15);
        assert_eq!(config.tick_interval, Duration::from_millis(55));
        assert_eq!(config.max_labels, 20);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_label_layout_tiers() {
        let config = WheelConfig::default();
        assert_eq!(config.label_layout(10).size, GlyphSize::Large);
        assert_eq!(config.label_layout(10).spacing, 75.0);
        assert_eq!(config.label_layout(11).size, GlyphSize::Compact);
        assert_eq!(config.label_layout(11).spacing, 35.0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = WheelConfig::builder()
            .seed(7)
            .large_label_max_sectors(4)
            .build();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.label_layout(5).size, GlyphSize::Compact);
    }
}
