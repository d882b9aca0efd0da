use crate::foundation::error::{AminovizError, AminovizResult};

/// Upper bound of the speed multiplier.
pub const MAX_SPEED: f64 = 3.0;
/// Granularity of the speed multiplier.
pub const SPEED_STEP: f64 = 0.1;

/// Playback state shared by the scheduler, scene compiler, and hit tester.
///
/// Only explicit toggles (play/pause, speed) and the scheduler's frame commits mutate it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Whether frames are being scheduled and pulses animate.
    pub running: bool,
    /// Time multiplier in `[0, 3]`.
    pub speed: f64,
    /// Accumulated animation time in milliseconds; frozen while paused.
    pub elapsed_ms: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            running: true,
            speed: 1.0,
            elapsed_ms: 0.0,
        }
    }
}

impl AnimationState {
    /// Set the speed multiplier, snapped to [`SPEED_STEP`].
    ///
    /// Non-finite values and values outside `[0, MAX_SPEED]` are rejected.
    pub fn set_speed(&mut self, speed: f64) -> AminovizResult<()> {
        self.speed = validate_speed(speed)?;
        Ok(())
    }
}

pub(crate) fn validate_speed(speed: f64) -> AminovizResult<f64> {
    if !speed.is_finite() || !(0.0..=MAX_SPEED).contains(&speed) {
        return Err(AminovizError::validation(format!(
            "speed must be within [0, {MAX_SPEED}], got {speed}"
        )));
    }
    Ok(((speed / SPEED_STEP).round() * SPEED_STEP).clamp(0.0, MAX_SPEED))
}

#[cfg(test)]
#[path = "../../tests/unit/anim/state.rs"]
mod tests;
