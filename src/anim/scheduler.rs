use crate::{
    anim::state::{AnimationState, validate_speed},
    foundation::error::AminovizResult,
};

/// Handle of one frame request issued by a [`FrameClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameRequestId(pub u64);

/// Host frame clock: the source of frame callbacks.
///
/// Each call to `request_frame` must eventually produce at most one callback carrying the
/// returned id, unless it is cancelled first.
pub trait FrameClock {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameRequestId;
    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Scheduler play state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Frames are scheduled continuously and time advances.
    Running,
    /// No frames are scheduled; time is frozen.
    Paused,
}

/// Result of delivering a frame callback to the [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameTick {
    /// The id did not match the pending request; nothing changed.
    Stale,
    /// Time advanced by `delta_ms` and the next frame was requested.
    Advanced {
        /// Milliseconds added to `elapsed_ms`.
        delta_ms: f64,
    },
    /// A redraw was delivered while paused; time is unchanged and nothing was requested.
    Idle,
}

/// Running/Paused state machine owning the animation clock.
///
/// At most one frame request is pending at a time. `elapsed_ms` only moves inside
/// [`Scheduler::on_frame`], by the non-negative delta between successive host timestamps.
#[derive(Debug)]
pub struct Scheduler {
    anim: AnimationState,
    pending: Option<FrameRequestId>,
    last_timestamp_ms: Option<f64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(AnimationState::default())
    }
}

impl Scheduler {
    /// Create an idle scheduler; call [`Scheduler::start`] to request the first frame.
    pub fn new(anim: AnimationState) -> Self {
        Self {
            anim,
            pending: None,
            last_timestamp_ms: None,
        }
    }

    /// Current animation state.
    pub fn state(&self) -> AnimationState {
        self.anim
    }

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        if self.anim.running {
            PlayState::Running
        } else {
            PlayState::Paused
        }
    }

    /// Outstanding frame request, if any.
    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    /// Whether `id` is the outstanding request.
    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending == Some(id)
    }

    /// Request the first frame when running and nothing is pending.
    pub fn start(&mut self, clock: &mut impl FrameClock) {
        if self.anim.running && self.pending.is_none() {
            self.pending = Some(clock.request_frame());
        }
    }

    /// Make sure one frame is pending, whatever the play state.
    ///
    /// While paused the callback comes back as [`FrameTick::Idle`]: it draws at the frozen time
    /// and requests nothing further.
    pub fn request_redraw(&mut self, clock: &mut impl FrameClock) {
        if self.pending.is_none() {
            self.pending = Some(clock.request_frame());
        }
    }

    /// Cancel the pending request without changing the play state.
    pub fn cancel(&mut self, clock: &mut impl FrameClock) {
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }

    /// Cancel scheduling and forget the delta base; used on teardown.
    pub fn stop(&mut self, clock: &mut impl FrameClock) {
        self.cancel(clock);
        self.last_timestamp_ms = None;
    }

    /// Cancel, then start again from a fresh delta base. `elapsed_ms` is kept.
    pub fn restart(&mut self, clock: &mut impl FrameClock) {
        self.stop(clock);
        self.start(clock);
    }

    /// Enter Paused: the pending request is cancelled and `elapsed_ms` freezes.
    pub fn pause(&mut self, clock: &mut impl FrameClock) {
        if !self.anim.running {
            return;
        }
        self.anim.running = false;
        self.stop(clock);
        tracing::debug!(elapsed_ms = self.anim.elapsed_ms, "animation paused");
    }

    /// Enter Running: a frame is requested and the next delta is measured from it.
    pub fn resume(&mut self, clock: &mut impl FrameClock) {
        if self.anim.running {
            return;
        }
        self.anim.running = true;
        self.last_timestamp_ms = None;
        self.start(clock);
        tracing::debug!(elapsed_ms = self.anim.elapsed_ms, "animation resumed");
    }

    /// Pause or resume.
    pub fn set_running(&mut self, running: bool, clock: &mut impl FrameClock) {
        if running {
            self.resume(clock);
        } else {
            self.pause(clock);
        }
    }

    /// Flip between Running and Paused; returns the new state.
    pub fn toggle(&mut self, clock: &mut impl FrameClock) -> PlayState {
        self.set_running(!self.anim.running, clock);
        self.play_state()
    }

    /// Set the speed multiplier; independent of the play state.
    pub fn set_speed(&mut self, speed: f64) -> AminovizResult<()> {
        self.anim.speed = validate_speed(speed)?;
        Ok(())
    }

    /// Deliver a frame callback at host time `timestamp_ms`.
    pub fn on_frame(
        &mut self,
        id: FrameRequestId,
        timestamp_ms: f64,
        clock: &mut impl FrameClock,
    ) -> FrameTick {
        if !self.is_pending(id) {
            tracing::trace!(id = id.0, "ignoring stale frame callback");
            return FrameTick::Stale;
        }
        self.pending = None;
        if !self.anim.running {
            return FrameTick::Idle;
        }

        let delta_ms = self.delta_for(timestamp_ms);
        if timestamp_ms.is_finite() {
            self.last_timestamp_ms = Some(
                self.last_timestamp_ms
                    .map_or(timestamp_ms, |prev| prev.max(timestamp_ms)),
            );
        }
        self.anim.elapsed_ms += delta_ms;
        self.pending = Some(clock.request_frame());
        FrameTick::Advanced { delta_ms }
    }

    /// State a frame at `timestamp_ms` would commit, without committing it.
    pub fn preview(&self, timestamp_ms: f64) -> AnimationState {
        let mut anim = self.anim;
        if anim.running {
            anim.elapsed_ms += self.delta_for(timestamp_ms);
        }
        anim
    }

    fn delta_for(&self, timestamp_ms: f64) -> f64 {
        match self.last_timestamp_ms {
            Some(prev) if timestamp_ms.is_finite() => (timestamp_ms - prev).max(0.0),
            _ => 0.0,
        }
    }

    /// Accept the pending callback without advancing time and ask for another frame.
    ///
    /// Used when the surface cannot be drawn to; the frame is retried on the next tick.
    pub fn defer(&mut self, id: FrameRequestId, clock: &mut impl FrameClock) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.pending = None;
        self.start(clock);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/scheduler.rs"]
mod tests;
