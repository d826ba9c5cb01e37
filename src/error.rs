use error_stack::Context;
use std::fmt::Display;

use crate::wheel::SpinState;

#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    TooFewSectors(usize),
    TooManyLabels { max: usize, actual: usize },
    InvalidInterval { min: i64, max: i64, interval: i64 },
    InvalidSlowdownStep(f64),
    InvalidRotateAngle(f64),
    SpinInProgress(SpinState),
}

impl Context for WheelError {}

impl Display for WheelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use WheelError::*;
        match self {
            TooFewSectors(n) => write!(f, "a wheel needs at least 2 sectors, got {n}"),

            TooManyLabels { max, actual } => {
                write!(f, "at most {max} labels fit on the wheel, got {actual}")
            }

            InvalidInterval { min, max, interval } => write!(
                f,
                "invalid label range {min}..={max} with interval {interval}"
            ),

            InvalidSlowdownStep(step) => {
                write!(f, "slowdown step must be positive, got {step}")
            }

            InvalidRotateAngle(angle) => {
                write!(f, "per-tick rotation must be finite and non-negative, got {angle}")
            }

            SpinInProgress(state) => write!(
                f,
                "cannot spin while the wheel is in state {state:?}. Spins are accepted in NotStarted and Highlighting"
            ),
        }
    }
}
