//! A wheel-of-fortune picker.
//!
//! [`WheelEngine`] lays labels out as pie slices, spins them through a
//! multi-phase deceleration and lands on one. The winner is known as soon as
//! [`WheelEngine::spin`] returns, long before the animation stops. Drawing
//! goes through the [`RenderTarget`] trait: [`Scene`] records frames and
//! [`Canvas`] rasterizes them into an RGBA buffer. Labels are drawn with a
//! small procedural digit font (see [`glyph`]).
//!
//! ```
//! use fortune_wheel::{Point, Scene, SpinState, WheelConfig, WheelEngine};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let config = WheelConfig::default();
//! let mut wheel =
//!     WheelEngine::from_range(Point::new(300.0, 300.0), 280.0, 1, 6, 1, &config, &mut rng)
//!         .unwrap();
//!
//! let winner = wheel.spin(&mut rng).unwrap();
//! while wheel.state() != SpinState::Highlighting {
//!     wheel.advance();
//!     let mut frame = Scene::new();
//!     wheel.draw(&mut frame);
//! }
//! assert_eq!(wheel.result(), Some(winner.as_str()));
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod announce;
pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod glyph;
pub mod polar;
pub mod render;
pub mod sector;
pub mod wheel;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use announce::{Announcement, Announcer};
pub use app::FortuneWheel;
pub use canvas::Canvas;
pub use config::WheelConfig;
pub use error::WheelError;
pub use glyph::GlyphSize;
pub use polar::{polar, Point};
pub use render::{Color, DrawCommand, RenderTarget, Scene, Stroke};
pub use sector::{GlyphPlacement, LabelLayout, Sector};
pub use wheel::{
    range_labels, simulate_from, simulate_outcome, winning_index, SpinPlan, SpinState,
    WheelEngine,
};
