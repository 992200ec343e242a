use std::time::Duration;

use crate::{
    draw::canvas::Canvas,
    foundation::error::SketchResult,
    render::{cpu::CpuSurface, surface::Surface},
    sketch::{random::Random, scheduler::FrameLoop},
};

/// Last known pointer position in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Everything a hook may touch during one call.
pub struct Context<'a, S: Surface = CpuSurface> {
    pub canvas: &'a mut Canvas<S>,
    pub frames: &'a mut FrameLoop,
    pub rng: &'a mut Random,
    pub pointer: Pointer,
    pub now: Duration,
}

impl<S: Surface> Context<'_, S> {
    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    /// Duration of the previous completed tick.
    pub fn delta_time(&self) -> Duration {
        self.frames.last_frame_duration()
    }

    pub fn frame_rate(&self) -> f64 {
        self.frames.frame_rate()
    }

    pub fn set_frame_rate(&mut self, fps: f64) -> SketchResult<()> {
        self.frames.set_frame_rate(fps)
    }

    /// Stop the loop after the current hook returns.
    pub fn stop(&mut self) {
        self.frames.stop();
    }
}

/// An interactive sketch. Every hook defaults to doing nothing.
///
/// `setup` runs once before the first `draw`; `draw` runs once per tick; pointer hooks run when
/// the host reports input.
pub trait Sketch<S: Surface = CpuSurface> {
    fn setup(&mut self, _ctx: &mut Context<'_, S>) -> SketchResult<()> {
        Ok(())
    }

    fn draw(&mut self, _ctx: &mut Context<'_, S>) -> SketchResult<()> {
        Ok(())
    }

    fn pointer_moved(&mut self, _ctx: &mut Context<'_, S>) -> SketchResult<()> {
        Ok(())
    }

    fn pointer_pressed(&mut self, _ctx: &mut Context<'_, S>) -> SketchResult<()> {
        Ok(())
    }

    fn pointer_clicked(&mut self, _ctx: &mut Context<'_, S>) -> SketchResult<()> {
        Ok(())
    }
}
