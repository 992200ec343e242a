use std::{cell::Cell, rc::Rc, time::Duration};

use crate::foundation::error::{SketchError, SketchResult};

/// Source of time for the frame loop.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    fn sleep(&self, dur: Duration);
}

/// Wall clock backed by [`std::time::Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Virtual clock for headless runs: `sleep` advances time instantly.
///
/// Clones share the same time, so a test can keep one and hand the other to a runner.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dur: Duration) {
        self.now.set(self.now.get() + dur);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, dur: Duration) {
        self.advance(dur);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    /// Rate changed; waiting for the driver to re-arm the deadline.
    Reconfiguring,
    Stopped,
}

/// Fixed-rate frame bookkeeping: interval, deadline, counters and the pointer-moved flag.
///
/// The loop does not own a thread or a callback; a driver (see [`crate::Runner`]) asks
/// [`FrameLoop::time_until_due`], sleeps, and reports each completed tick.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    frame_rate: f64,
    interval: Duration,
    frame_count: u64,
    last_frame_duration: Duration,
    state: LoopState,
    next_due: Option<Duration>,
    pointer_moved: bool,
}

impl FrameLoop {
    pub fn new(frame_rate: f64) -> SketchResult<Self> {
        let interval = interval_for(frame_rate)?;
        Ok(Self {
            frame_rate,
            interval,
            frame_count: 0,
            last_frame_duration: Duration::ZERO,
            state: LoopState::Uninitialized,
            next_due: None,
            pointer_moved: false,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_frame_duration(&self) -> Duration {
        self.last_frame_duration
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Arm the first tick at `now`.
    pub fn start(&mut self, now: Duration) -> SketchResult<()> {
        if self.state != LoopState::Uninitialized {
            return Err(SketchError::validation(format!(
                "frame loop cannot start from {:?}",
                self.state
            )));
        }
        self.state = LoopState::Running;
        self.next_due = Some(now);
        Ok(())
    }

    /// Change the tick rate; an unchanged rate is a no-op. The pending deadline is cancelled
    /// and re-armed by [`FrameLoop::rearm`].
    pub fn set_frame_rate(&mut self, fps: f64) -> SketchResult<()> {
        let interval = interval_for(fps)?;
        if fps == self.frame_rate {
            return Ok(());
        }
        tracing::debug!(from = self.frame_rate, to = fps, "frame rate changed");
        self.frame_rate = fps;
        self.interval = interval;
        self.next_due = None;
        if self.state == LoopState::Running {
            self.state = LoopState::Reconfiguring;
        }
        Ok(())
    }

    /// Re-arm after a rate change at `now + interval`. Returns whether anything changed.
    pub fn rearm(&mut self, now: Duration) -> bool {
        if self.state != LoopState::Reconfiguring {
            return false;
        }
        self.state = LoopState::Running;
        self.next_due = Some(now + self.interval);
        true
    }

    /// Remaining wait before the next tick, or `None` when the loop is not armed.
    pub fn time_until_due(&self, now: Duration) -> Option<Duration> {
        if self.state != LoopState::Running {
            return None;
        }
        self.next_due.map(|due| due.saturating_sub(now))
    }

    pub fn is_due(&self, now: Duration) -> bool {
        self.time_until_due(now) == Some(Duration::ZERO)
    }

    /// Record a completed tick that started at `started` and ended at `now`.
    pub fn complete_tick(&mut self, started: Duration, now: Duration) {
        self.frame_count += 1;
        self.last_frame_duration = now.saturating_sub(started);
        self.advance_deadline(now);
    }

    /// Move the deadline past a tick without counting it (e.g. a failed draw).
    pub fn skip_tick(&mut self, now: Duration) {
        self.advance_deadline(now);
    }

    fn advance_deadline(&mut self, now: Duration) {
        let Some(due) = self.next_due else {
            return;
        };
        let next = due + self.interval;
        // Late ticks coalesce instead of bursting to catch up.
        self.next_due = Some(if next <= now { now + self.interval } else { next });
    }

    /// Cancel the loop from any state. A stopped loop cannot be started again.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
        self.next_due = None;
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    pub fn mark_pointer_moved(&mut self) {
        self.pointer_moved = true;
    }

    /// Read and clear the pointer-moved flag.
    pub fn take_pointer_moved(&mut self) -> bool {
        std::mem::take(&mut self.pointer_moved)
    }
}

fn interval_for(fps: f64) -> SketchResult<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(SketchError::validation(format!(
            "frame rate must be finite and > 0, got {fps}"
        )));
    }
    Duration::try_from_secs_f64(1.0 / fps)
        .map_err(|e| SketchError::validation(format!("frame rate {fps} out of range: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/scheduler.rs"]
mod tests;
