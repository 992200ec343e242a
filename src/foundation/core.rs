use crate::foundation::error::{SketchError, SketchResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// A quarter turn divided in half: `π / 4`.
pub const QUARTER_PI: f64 = std::f64::consts::FRAC_PI_4;
/// A quarter turn: `π / 2`.
pub const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;
/// Half a turn: `π`.
pub const PI: f64 = std::f64::consts::PI;
/// A full turn: `2π`.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as `u16`, the raster limit of the CPU surface.
    pub fn to_u16(self) -> SketchResult<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::validation("surface size must be non-zero"));
        }
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| SketchError::validation("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| SketchError::validation("surface height exceeds u16"))?;
        Ok((w, h))
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
