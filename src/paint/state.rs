use crate::{
    paint::color::{BLACK, Color},
    render::text::Font,
};

/// Unit in which rotation angles are given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Multiplier from this unit to radians.
    pub fn to_radians_factor(self) -> f64 {
        match self {
            Self::Degrees => std::f64::consts::PI / 180.0,
            Self::Radians => 1.0,
        }
    }

    /// One full turn expressed in this unit.
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => std::f64::consts::TAU,
        }
    }
}

/// Horizontal anchoring of text relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Ambient settings read by every primitive at call time.
///
/// Setters only affect subsequent drawing; nothing is applied retroactively and no history is
/// kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingState {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    /// Ambient rotation in `angle_mode` units.
    pub rotation: f64,
    pub angle_mode: AngleMode,
    pub text_size: f64,
    pub text_align: TextAlign,
    pub font: Option<Font>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill: Some(BLACK),
            stroke: Some(BLACK),
            line_width: 1.0,
            rotation: 0.0,
            angle_mode: AngleMode::Degrees,
            text_size: 20.0,
            text_align: TextAlign::Left,
            font: None,
        }
    }
}

impl DrawingState {
    pub fn set_fill(&mut self, color: Color) {
        self.fill = Some(color);
    }

    pub fn set_stroke(&mut self, color: Color) {
        self.stroke = Some(color);
    }

    pub fn clear_fill(&mut self) {
        self.fill = None;
    }

    pub fn clear_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn set_line_width(&mut self, px: f64) {
        self.line_width = px;
    }

    pub fn set_text_size(&mut self, px: f64) {
        self.text_size = px;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Add `delta`; reaching or passing a full turn resets the rotation to zero.
    pub fn add_rotation(&mut self, delta: f64) {
        self.rotation += delta;
        if self.rotation >= self.angle_mode.full_turn() {
            self.rotation = 0.0;
        }
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation * self.angle_mode.to_radians_factor()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/state.rs"]
mod tests;
