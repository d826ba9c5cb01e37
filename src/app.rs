// ============================================================================
// WINDOW HOST
// ============================================================================

use error_stack::{report, Result};
use log::{debug, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::{self, Sender};
use std::fmt::Display;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::announce::{Announcement, Announcer};
use crate::canvas::Canvas;
use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::polar::Point;
use crate::render::Scene;
use crate::wheel::{SpinPlan, WheelEngine};

/// Window that shows a wheel and spins it on a left click or Space.
///
/// Each spin builds a fresh wheel with new colors. The winner goes to the
/// log and the window title shortly after the wheel comes to rest.
#[derive(Debug, Clone)]
pub struct FortuneWheel {
    config: WheelConfig,
    labels: Vec<String>,
}

impl FortuneWheel {
    pub fn new(config: WheelConfig, labels: Vec<String>) -> Result<Self, WheelError> {
        if labels.len() < 2 {
            return Err(report!(WheelError::TooFewSectors(labels.len())));
        }
        if labels.len() > config.max_labels {
            return Err(report!(WheelError::TooManyLabels {
                max: config.max_labels,
                actual: labels.len(),
            }));
        }
        Ok(Self { config, labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Wheel center and radius for a frame of the given size.
    pub fn geometry(&self, width: usize, height: usize) -> (Point, f64) {
        let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
        let radius = (width.min(height) as f64 / 2.0 - self.config.wheel_margin as f64).max(1.0);
        (center, radius)
    }

    fn build_engine(
        &self,
        width: usize,
        height: usize,
        rng: &mut StdRng,
    ) -> Result<WheelEngine, WheelError> {
        let (center, radius) = self.geometry(width, height);
        WheelEngine::new(center, radius, self.labels.iter().cloned(), &self.config, rng)
    }

    /// Builds a new wheel, spins it and schedules the announcement of its
    /// winner for just after the wheel stops.
    fn start_round(
        &self,
        width: usize,
        height: usize,
        rng: &mut StdRng,
        winners: &Sender<String>,
    ) -> Result<(WheelEngine, Announcement), WheelError> {
        let mut engine = self.build_engine(width, height, rng)?;
        let plan = SpinPlan::random(rng, &self.config);
        let winner = engine.spin_with_plan(plan)?;

        let ticks = plan.ticks_to_stop(self.config.slowdown_step)?;
        let delay = self.config.tick_interval * ticks + self.config.announce_delay;
        debug!("announcing in {:?} ({} ticks)", delay, ticks);

        let winners = winners.clone();
        let pending = Announcer::new(delay).schedule(winner, move |winner| {
            let _ = winners.send(winner);
        });
        Ok((engine, pending))
    }

    pub fn show(&self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut engine = self
            .build_engine(fb_width, fb_height, &mut rng)
            .map_err(|report| format!("{report:?}"))?;
        let mut pending: Option<Announcement> = None;
        let (winners_tx, winners_rx) = mpsc::channel::<String>();

        let mut clock = TickClock::new(self.config.tick_interval, Instant::now());

        info!(
            "showing a wheel with {} entries. Click or press Space to spin",
            self.labels.len()
        );

        event_loop.run(move |event, window_target| {
            let mut spin_requested = false;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        let buffer = pixels.resize_buffer(new_size.width, new_size.height);
                        (fb_width, fb_height) = resized_frame(
                            (fb_width, fb_height),
                            (new_size.width, new_size.height),
                            buffer,
                        );
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!("failed to resize surface: {err}");
                        }
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => spin_requested = true,
                    WindowEvent::KeyboardInput { event, .. } => {
                        spin_requested = event.state == ElementState::Pressed
                            && !event.repeat
                            && event.logical_key == Key::Named(NamedKey::Space);
                    }
                    WindowEvent::RedrawRequested => {
                        while let Ok(winner) = winners_rx.try_recv() {
                            info!("the wheel picked {winner:?}");
                            window_clone.set_title(&format!("{} - {}", self.config.title, winner));
                        }

                        let mut scene = Scene::new();
                        engine.draw(&mut scene);
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        scene.replay(&mut canvas);
                        if let Err(err) = pixels.render() {
                            warn!("failed to present frame: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if clock.poll(Instant::now()) {
                        engine.advance();
                        window_clone.request_redraw();
                    }
                    window_target.set_control_flow(ControlFlow::WaitUntil(clock.deadline()));
                }
                _ => {}
            }

            if !spin_requested {
                return;
            }
            if !engine.state().accepts_spin() {
                debug!("ignoring spin request while {:?}", engine.state());
                return;
            }
            if let Some(previous) = pending.take() {
                previous.cancel();
            }
            match self.start_round(fb_width, fb_height, &mut rng, &winners_tx) {
                Ok((next, announcement)) => {
                    engine = next;
                    pending = Some(announcement);
                    window_clone.set_title(&self.config.title);
                }
                Err(report) => warn!("could not start a spin: {report:?}"),
            }
        })?;

        Ok(())
    }
}

/// Paces animation ticks to a fixed real-time interval.
#[derive(Debug, Clone, Copy)]
struct TickClock {
    interval: Duration,
    last: Instant,
}

impl TickClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// Whether a tick is due at `now`. A due tick starts the next interval.
    fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// When the next tick falls due.
    fn deadline(&self) -> Instant {
        self.last + self.interval
    }
}

/// Frame size to draw at after asking the pixel buffer for `requested`.
/// A failed buffer resize keeps the size the buffer still has.
fn resized_frame<E: Display>(
    current: (usize, usize),
    requested: (u32, u32),
    buffer: std::result::Result<(), E>,
) -> (usize, usize) {
    match buffer {
        Ok(()) => (requested.0 as usize, requested.1 as usize),
        Err(err) => {
            warn!(
                "failed to resize frame buffer to {}x{}: {err}",
                requested.0, requested.1
            );
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_label_bounds() {
        let config = WheelConfig::default();
        let err = FortuneWheel::new(config.clone(), labels(1)).unwrap_err();
        assert_eq!(err.current_context(), &WheelError::TooFewSectors(1));

        let err = FortuneWheel::new(config.clone(), labels(21)).unwrap_err();
        assert_eq!(
            err.current_context(),
            &WheelError::TooManyLabels { max: 20, actual: 21 }
        );

        assert!(FortuneWheel::new(config.clone(), labels(2)).is_ok());
        assert!(FortuneWheel::new(config, labels(20)).is_ok());
    }

    #[test]
    fn test_geometry_fits_frame() {
        let app = FortuneWheel::new(WheelConfig::default(), labels(4)).unwrap();
        let (center, radius) = app.geometry(640, 620);
        assert_eq!(center, Point::new(320.0, 310.0));
        assert_eq!(radius, 300.0);
    }

    #[test]
    fn test_round_announces_predicted_winner() {
        let config = WheelConfig::builder()
            .tick_interval(std::time::Duration::from_millis(0))
            .announce_delay(std::time::Duration::from_millis(5))
            .build();
        let app = FortuneWheel::new(config, labels(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let (tx, rx) = mpsc::channel();

        let (mut engine, pending) = app.start_round(400, 400, &mut rng, &tx).unwrap();
        pending.wait();
        let announced = rx.try_recv().unwrap();

        engine.run_until_stopped();
        assert_eq!(engine.result(), Some(announced.as_str()));
    }

    #[test]
    fn test_tick_clock_waits_for_interval() {
        let start = Instant::now();
        let interval = Duration::from_millis(55);
        let mut clock = TickClock::new(interval, start);

        assert_eq!(clock.deadline(), start + interval);
        assert!(!clock.poll(start + Duration::from_millis(10)));
        assert!(clock.poll(start + interval));
        assert_eq!(clock.deadline(), start + interval * 2);
        assert!(!clock.poll(start + Duration::from_millis(100)));
        assert!(clock.poll(start + Duration::from_millis(120)));
    }

    #[test]
    fn test_failed_resize_keeps_frame_size() {
        let kept = resized_frame((640, 620), (800, 600), Err("out of memory"));
        assert_eq!(kept, (640, 620));

        let resized = resized_frame((640, 620), (800, 600), Ok::<(), &str>(()));
        assert_eq!(resized, (800, 600));
    }
}
