use crate::{
    draw::canvas::Canvas,
    foundation::error::{SketchError, SketchResult},
    paint::color::BLACK,
    render::{cpu::CpuSurface, frame::FrameRGBA, surface::Surface},
    sketch::{
        app::{Context, Pointer, Sketch},
        random::Random,
        scheduler::{Clock, FrameLoop, LoopState, SystemClock},
    },
};

/// Drives a [`Sketch`] on a [`Canvas`] at a fixed frame rate.
///
/// Single-threaded: hooks are called one at a time from whichever thread calls into the
/// runner, never re-entrantly.
pub struct Runner<A, S: Surface = CpuSurface, C: Clock = SystemClock> {
    sketch: A,
    canvas: Canvas<S>,
    frames: FrameLoop,
    clock: C,
    rng: Random,
    pointer: Pointer,
}

impl<A, S, C> Runner<A, S, C>
where
    A: Sketch<S>,
    S: Surface,
    C: Clock,
{
    pub fn new(sketch: A, canvas: Canvas<S>, clock: C, frame_rate: f64) -> SketchResult<Self> {
        Ok(Self {
            sketch,
            canvas,
            frames: FrameLoop::new(frame_rate)?,
            clock,
            rng: Random::default(),
            pointer: Pointer::default(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Random::seeded(seed);
        self
    }

    pub fn sketch(&self) -> &A {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut A {
        &mut self.sketch
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<S> {
        &mut self.canvas
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    pub fn set_frame_rate(&mut self, fps: f64) -> SketchResult<()> {
        self.frames.set_frame_rate(fps)
    }

    /// Clear to black, run `setup` once and arm the first tick.
    #[tracing::instrument(skip(self), fields(frame_rate = self.frames.frame_rate()))]
    pub fn start(&mut self) -> SketchResult<()> {
        if self.frames.state() != LoopState::Uninitialized {
            return Err(SketchError::validation(format!(
                "runner cannot start from {:?}",
                self.frames.state()
            )));
        }
        self.canvas.background(BLACK);
        self.dispatch(|sketch, ctx| sketch.setup(ctx))?;
        let now = self.clock.now();
        self.frames.start(now)
    }

    /// Run one frame now, regardless of the deadline.
    pub fn tick(&mut self) -> SketchResult<()> {
        match self.frames.state() {
            LoopState::Running | LoopState::Reconfiguring => {}
            state => {
                return Err(SketchError::validation(format!(
                    "cannot tick a frame loop in state {state:?}"
                )));
            }
        }

        let started = self.clock.now();
        let res = self.dispatch(|sketch, ctx| sketch.draw(ctx)).and_then(|()| {
            if self.frames.take_pointer_moved() {
                self.dispatch(|sketch, ctx| sketch.pointer_moved(ctx))
            } else {
                Ok(())
            }
        });
        let now = self.clock.now();
        if let Err(e) = res {
            self.frames.skip_tick(now);
            return Err(e);
        }
        self.frames.complete_tick(started, now);
        self.canvas.end_frame()
    }

    /// Wait for the next deadline (re-arming after a rate change) and tick.
    ///
    /// Returns `Ok(false)` once the loop is stopped.
    pub fn step(&mut self) -> SketchResult<bool> {
        let now = self.clock.now();
        self.frames.rearm(now);
        let Some(wait) = self.frames.time_until_due(now) else {
            return Ok(false);
        };
        if !wait.is_zero() {
            self.clock.sleep(wait);
        }
        self.tick()?;
        Ok(true)
    }

    /// Start if needed, then run `ticks` scheduled frames. Failed frames are logged and do not
    /// stop the loop. Returns the number of frames that completed.
    pub fn run_for(&mut self, ticks: u64) -> SketchResult<u64> {
        self.ensure_started()?;
        let before = self.frames.frame_count();
        for _ in 0..ticks {
            if self.frames.is_stopped() {
                break;
            }
            if let Err(e) = self.step() {
                tracing::error!(error = %e, frame = self.frames.frame_count(), "frame failed");
            }
        }
        Ok(self.frames.frame_count() - before)
    }

    /// Start if needed, then tick until a hook (or the host) calls [`Runner::stop`].
    pub fn run_until_stopped(&mut self) -> SketchResult<()> {
        self.ensure_started()?;
        while !self.frames.is_stopped() {
            if let Err(e) = self.step() {
                tracing::error!(error = %e, frame = self.frames.frame_count(), "frame failed");
            }
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.frames.stop();
    }

    /// Record a pointer position; `pointer_moved` runs after the next `draw`.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Pointer { x, y };
        self.frames.mark_pointer_moved();
    }

    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> SketchResult<()> {
        self.pointer = Pointer { x, y };
        self.dispatch(|sketch, ctx| sketch.pointer_pressed(ctx))
    }

    pub fn pointer_clicked(&mut self, x: f64, y: f64) -> SketchResult<()> {
        self.pointer = Pointer { x, y };
        self.dispatch(|sketch, ctx| sketch.pointer_clicked(ctx))
    }

    fn ensure_started(&mut self) -> SketchResult<()> {
        if self.frames.state() == LoopState::Uninitialized {
            self.start()?;
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        hook: impl FnOnce(&mut A, &mut Context<'_, S>) -> SketchResult<()>,
    ) -> SketchResult<()> {
        let mut ctx = Context {
            canvas: &mut self.canvas,
            frames: &mut self.frames,
            rng: &mut self.rng,
            pointer: self.pointer,
            now: self.clock.now(),
        };
        hook(&mut self.sketch, &mut ctx)
    }
}

impl<A, C> Runner<A, CpuSurface, C>
where
    A: Sketch<CpuSurface>,
    C: Clock,
{
    /// Commit and read back the current frame.
    pub fn snapshot(&mut self) -> SketchResult<FrameRGBA> {
        self.canvas.snapshot()
    }
}

impl<A, S: Surface, C: Clock> std::fmt::Debug for Runner<A, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("frames", &self.frames)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/runner.rs"]
mod tests;
