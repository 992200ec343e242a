//! Small demo sketches built on the public drawing API.

use std::{fmt, str::FromStr};

use crate::{
    foundation::error::SketchError,
    paint::color::{BLUE, Color, GRAY, ORANGE, PINK, PURPLE, RED, TEAL, YELLOW},
};

pub(crate) mod caterpillar;
pub(crate) mod flappy;
pub(crate) mod garden;

pub(crate) const FLOWER_PALETTE: [Color; 8] = [RED, GRAY, ORANGE, YELLOW, BLUE, TEAL, PURPLE, PINK];

/// The sketches shipped with the crate, addressable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinSketch {
    Garden,
    Flappy,
    Caterpillar,
}

impl BuiltinSketch {
    pub const ALL: [BuiltinSketch; 3] = [Self::Garden, Self::Flappy, Self::Caterpillar];

    pub fn name(self) -> &'static str {
        match self {
            Self::Garden => "garden",
            Self::Flappy => "flappy",
            Self::Caterpillar => "caterpillar",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Garden => "random flowers and a spinning pixel bitmap; click to plant",
            Self::Flappy => "flap through scrolling pipes; click to flap or restart",
            Self::Caterpillar => "caterpillars race to the finish line; click to restart",
        }
    }
}

impl fmt::Display for BuiltinSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinSketch {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SketchError::validation(format!("unknown sketch '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/mod.rs"]
mod tests;
