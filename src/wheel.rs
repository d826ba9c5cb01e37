//! The spinning wheel: sector layout, spin state machine and outcome
//! simulation.
//!
//! A spin is fully determined by its [`SpinPlan`]. [`WheelEngine::spin`]
//! first replays the whole plan without drawing (see [`simulate_from`]) to
//! learn the winner, then animates the same plan tick by tick through
//! [`WheelEngine::advance`]. Both paths step the same motion model and wrap the
//! reference offset with the same arithmetic, so the wheel always lands where
//! the simulation said it would.

use error_stack::{report, Result};
use log::{debug, info, warn};
use rand::Rng;

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::polar::{polar, Point};
use crate::render::{Color, RenderTarget};
use crate::sector::{wrap_offset, Sector, TOP_ANGLE};

/// Phase of the spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    NotStarted,
    InitialSpin,
    SlowingDown,
    Highlighting,
}

impl SpinState {
    /// Whether a new spin may start from this state.
    pub fn accepts_spin(self) -> bool {
        matches!(self, SpinState::NotStarted | SpinState::Highlighting)
    }

    pub fn is_spinning(self) -> bool {
        matches!(self, SpinState::InitialSpin | SpinState::SlowingDown)
    }
}

/// The random draw behind one spin and the tick parameters derived from it.
///
/// Plans always carry a finite, non-negative per-tick rotation, so a spin
/// driven by one is guaranteed to stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    total_rotation: u32,
    initial_ticks: u32,
    rotate_angle: f64,
}

impl SpinPlan {
    pub fn from_total_rotation(total_rotation: u32, approx_initial_rotate: u32) -> Self {
        let initial_ticks = (total_rotation / approx_initial_rotate.max(1)).max(1);
        Self {
            total_rotation,
            initial_ticks,
            rotate_angle: total_rotation as f64 / initial_ticks as f64,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, config: &WheelConfig) -> Self {
        let (low, high) = config.rotation_range;
        let total_rotation = if high > low {
            rng.random_range(low..high)
        } else {
            low
        };
        Self::from_total_rotation(total_rotation, config.approx_initial_rotate)
    }

    /// A plan turning `rotate_angle` degrees per tick for `initial_ticks`
    /// ticks before slowing down.
    pub fn with_rotation(initial_ticks: u32, rotate_angle: f64) -> Result<Self, WheelError> {
        if !rotate_angle.is_finite() || rotate_angle < 0.0 {
            return Err(report!(WheelError::InvalidRotateAngle(rotate_angle)));
        }
        let initial_ticks = initial_ticks.max(1);
        Ok(Self {
            total_rotation: (rotate_angle * initial_ticks as f64).round() as u32,
            initial_ticks,
            rotate_angle,
        })
    }

    /// Degrees turned during the initial spin.
    pub fn total_rotation(&self) -> u32 {
        self.total_rotation
    }

    pub fn initial_ticks(&self) -> u32 {
        self.initial_ticks
    }

    /// Per-tick rotation during the initial spin.
    pub fn rotate_angle(&self) -> f64 {
        self.rotate_angle
    }

    /// Number of `advance` calls from the start of the spin up to and
    /// including the tick the wheel stops on.
    pub fn ticks_to_stop(&self, slowdown_step: f64) -> Result<u32, WheelError> {
        check_slowdown_step(slowdown_step)?;
        let mut motion = Motion::new(self, slowdown_step);
        let mut ticks = 1;
        while motion.step().is_some() {
            ticks += 1;
        }
        Ok(ticks)
    }
}

/// Per-tick rotation physics shared by the visible engine and the simulation.
#[derive(Debug, Clone)]
struct Motion {
    rotate_angle: f64,
    initial_ticks: u32,
    tick_counter: u32,
    slowdown_step: f64,
    slowing: bool,
}

impl Motion {
    fn new(plan: &SpinPlan, slowdown_step: f64) -> Self {
        Self {
            rotate_angle: plan.rotate_angle,
            initial_ticks: plan.initial_ticks.max(1),
            tick_counter: 0,
            slowdown_step,
            slowing: false,
        }
    }

    /// Advances one tick and returns the rotation to apply, or `None` once
    /// the wheel has come to rest.
    fn step(&mut self) -> Option<f64> {
        if !self.slowing {
            self.tick_counter += 1;
            if self.tick_counter == self.initial_ticks {
                self.tick_counter = 0;
                self.slowing = true;
            }
            return Some(self.rotate_angle);
        }

        self.tick_counter += 1;
        self.rotate_angle -= self.slowdown_step;
        if self.rotate_angle <= 0.0 {
            None
        } else {
            Some(self.rotate_angle)
        }
    }
}

fn check_slowdown_step(slowdown_step: f64) -> Result<(), WheelError> {
    if !slowdown_step.is_finite() || slowdown_step <= 0.0 {
        return Err(report!(WheelError::InvalidSlowdownStep(slowdown_step)));
    }
    Ok(())
}

pub fn sector_width(sector_count: usize) -> f64 {
    360.0 / sector_count as f64
}

/// Index of the sector under the pointer at 12 o'clock, given the offset of
/// sector 0. Relies on every sector turning in lockstep.
pub fn winning_index(sector_count: usize, angular_width: f64, reference_offset: f64) -> usize {
    let last = sector_count.saturating_sub(1) as i64;
    let passed = (((reference_offset + 90.0) % 360.0) / angular_width).floor() as i64;
    (sector_count as i64 - passed - 1).clamp(0, last) as usize
}

/// Runs a whole spin without drawing and returns the winning index.
///
/// `start_offset` is the current offset of sector 0.
pub fn simulate_from(
    sector_count: usize,
    start_offset: f64,
    plan: &SpinPlan,
    slowdown_step: f64,
) -> Result<usize, WheelError> {
    if sector_count < 2 {
        return Err(report!(WheelError::TooFewSectors(sector_count)));
    }
    check_slowdown_step(slowdown_step)?;

    let mut offset = start_offset;
    let mut motion = Motion::new(plan, slowdown_step);
    while let Some(delta) = motion.step() {
        offset = wrap_offset(offset, delta);
    }
    Ok(winning_index(sector_count, sector_width(sector_count), offset))
}

/// Winner of a fresh wheel spun by `total_rotation` degrees with the default
/// tuning.
pub fn simulate_outcome(sector_count: usize, total_rotation: u32) -> Result<usize, WheelError> {
    let config = WheelConfig::default();
    let plan = SpinPlan::from_total_rotation(total_rotation, config.approx_initial_rotate);
    simulate_from(sector_count, TOP_ANGLE, &plan, config.slowdown_step)
}

#[derive(Debug, Clone)]
pub struct WheelEngine {
    config: WheelConfig,
    center: Point,
    radius: f64,
    sectors: Vec<Sector>,
    state: SpinState,
    motion: Option<Motion>,
    predicted: Option<usize>,
    final_sector_index: Option<usize>,
    result: Option<String>,
    highlight_rising: bool,
    pointer: [Point; 3],
}

impl WheelEngine {
    /// Builds a wheel with one sector per label, each with a random fill.
    pub fn new<R, I, S>(
        center: Point,
        radius: f64,
        labels: I,
        config: &WheelConfig,
        rng: &mut R,
    ) -> Result<Self, WheelError>
    where
        R: Rng,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() < 2 {
            return Err(report!(WheelError::TooFewSectors(labels.len())));
        }
        check_slowdown_step(config.slowdown_step)?;

        let width = sector_width(labels.len());
        let sectors = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let fill = Color::new(rng.random(), rng.random(), rng.random());
                Sector::new(i, label, width, fill)
            })
            .collect::<Vec<_>>();

        let apex = Point::new(center.x, center.y - (radius + 3.0) + config.pointer_size);
        let pointer = [
            apex,
            polar(apex, config.pointer_size, 60.0),
            polar(apex, config.pointer_size, 120.0),
        ];

        debug!("built wheel with {} sectors", sectors.len());
        Ok(Self {
            config: config.clone(),
            center,
            radius,
            sectors,
            state: SpinState::NotStarted,
            motion: None,
            predicted: None,
            final_sector_index: None,
            result: None,
            highlight_rising: false,
            pointer,
        })
    }

    /// Builds a wheel labeled `min, min + interval, ...` up to `max`.
    pub fn from_range<R: Rng>(
        center: Point,
        radius: f64,
        min: i64,
        max: i64,
        interval: i64,
        config: &WheelConfig,
        rng: &mut R,
    ) -> Result<Self, WheelError> {
        let labels = range_labels(min, max, interval)?;
        Self::new(center, radius, labels, config, rng)
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Label of the sector the wheel stopped on. Set once highlighting.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn final_sector_index(&self) -> Option<usize> {
        self.final_sector_index
    }

    /// Winner computed by the simulation at the start of the current spin.
    pub fn predicted_index(&self) -> Option<usize> {
        self.predicted
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn pointer(&self) -> &[Point; 3] {
        &self.pointer
    }

    fn reference_offset(&self) -> f64 {
        self.sectors[0].offset_angle()
    }

    /// Starts a spin with a random total rotation and returns the label the
    /// wheel is going to land on.
    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Result<String, WheelError> {
        self.ensure_idle()?;
        let plan = SpinPlan::random(rng, &self.config);
        self.spin_with_plan(plan)
    }

    pub fn spin_with_plan(&mut self, plan: SpinPlan) -> Result<String, WheelError> {
        self.ensure_idle()?;

        let predicted = simulate_from(
            self.sectors.len(),
            self.reference_offset(),
            &plan,
            self.config.slowdown_step,
        )?;

        if let Some(previous) = self.final_sector_index.take() {
            self.sectors[previous].restore_fill();
        }
        self.result = None;
        self.predicted = Some(predicted);
        self.motion = Some(Motion::new(&plan, self.config.slowdown_step));
        self.highlight_rising = false;
        self.state = SpinState::InitialSpin;

        info!(
            "spinning {} degrees over {} ticks, landing on sector {}",
            plan.total_rotation, plan.initial_ticks, predicted
        );
        Ok(self.sectors[predicted].label().to_string())
    }

    fn ensure_idle(&self) -> Result<(), WheelError> {
        if self.state.accepts_spin() {
            Ok(())
        } else {
            debug!("rejecting spin in state {:?}", self.state);
            Err(report!(WheelError::SpinInProgress(self.state)))
        }
    }

    /// One animation tick.
    pub fn advance(&mut self) {
        match self.state {
            SpinState::NotStarted => {}
            SpinState::InitialSpin | SpinState::SlowingDown => self.advance_motion(),
            SpinState::Highlighting => self.pulse_highlight(),
        }
    }

    /// Ticks until the wheel comes to rest and returns the ticks taken.
    pub fn run_until_stopped(&mut self) -> u32 {
        let mut ticks = 0;
        while self.state.is_spinning() {
            self.advance();
            ticks += 1;
        }
        ticks
    }

    fn advance_motion(&mut self) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        let delta = motion.step();
        let slowing = motion.slowing;

        match delta {
            Some(delta) => {
                self.rotate(delta);
                if slowing && self.state == SpinState::InitialSpin {
                    debug!("initial spin finished, slowing down");
                    self.state = SpinState::SlowingDown;
                }
            }
            None => self.stop(),
        }
    }

    fn rotate(&mut self, delta: f64) {
        for sector in &mut self.sectors {
            sector.rotate(delta);
        }
    }

    fn stop(&mut self) {
        let index = winning_index(
            self.sectors.len(),
            self.sectors[0].angular_width(),
            self.reference_offset(),
        );
        if self.predicted != Some(index) {
            warn!(
                "wheel landed on sector {} but the simulation predicted {:?}",
                index, self.predicted
            );
        }

        let label = self.sectors[index].label().to_string();
        self.sectors[index].set_fill(self.config.highlight_marker);
        self.final_sector_index = Some(index);
        self.result = Some(label.clone());
        self.highlight_rising = false;
        self.motion = None;
        self.state = SpinState::Highlighting;
        info!("wheel stopped on sector {index} ({label:?})");
    }

    fn pulse_highlight(&mut self) {
        let Some(index) = self.final_sector_index else {
            return;
        };
        let level = self.sectors[index].fill().r;
        // A saturated level turns around even when the bounds sit at the
        // ends of the u8 range.
        let at_top = level > self.config.highlight_high || level == u8::MAX;
        let at_bottom = level < self.config.highlight_low || level == u8::MIN;
        if at_top && self.highlight_rising {
            self.highlight_rising = false;
        } else if at_bottom && !self.highlight_rising {
            self.highlight_rising = true;
        }

        let step = self.config.highlight_step;
        let next = if self.highlight_rising {
            level.saturating_add(step)
        } else {
            level.saturating_sub(step)
        };
        self.sectors[index].set_fill(Color::new(next, next, 0x00));
    }

    /// Draws the current frame. Drawing never changes the engine.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.clear(self.config.background);
        for sector in &self.sectors {
            sector.draw_fill(target, self.center, self.radius);
            sector.draw_outline(target, self.center, self.radius, self.config.border_pen);
        }

        let layout = self.config.label_layout(self.sectors.len());
        for sector in &self.sectors {
            sector.draw_label(
                target,
                self.center,
                self.radius,
                layout,
                self.config.label_pen,
            );
        }

        target.fill_polygon(&self.pointer, self.config.pointer_color);
    }
}

/// Labels `min, min + interval, ...` not exceeding `max`.
pub fn range_labels(min: i64, max: i64, interval: i64) -> Result<Vec<String>, WheelError> {
    if interval <= 0 || max < min {
        return Err(report!(WheelError::InvalidInterval { min, max, interval }));
    }
    let count = (max - min) / interval + 1;
    Ok((0..count).map(|i| (min + interval * i).to_string()).collect())
}
