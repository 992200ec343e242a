use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SketchError, SketchResult};

/// Straight-alpha RGBA color with byte channels (0..=255).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const GRAY: Color = Color::rgb(128, 128, 128);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const ORANGE: Color = Color::rgb(255, 128, 0);
pub const TEAL: Color = Color::rgb(0, 255, 255);
pub const PURPLE: Color = Color::rgb(128, 0, 128);
pub const PINK: Color = Color::rgb(255, 0, 128);

/// Build a color; `alpha` defaults to fully opaque.
pub fn make_color(red: u8, green: u8, blue: u8, alpha: Option<u8>) -> Color {
    Color::rgba(red, green, blue, alpha.unwrap_or(255))
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `rgba(r, g, b, a)` with `a` expressed as the CSS 0..1 fraction of 255.
    pub fn to_css_string(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            css_alpha(self.a)
        )
    }

    /// Premultiplied RGBA8 bytes (rounded).
    pub fn premultiplied(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

fn css_alpha(a: u8) -> String {
    match a {
        0 => "0".to_owned(),
        255 => "1".to_owned(),
        _ => {
            let s = format!("{:.4}", f64::from(a) / 255.0);
            s.trim_end_matches('0').trim_end_matches('.').to_owned()
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

impl FromStr for Color {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_fn(body);
        }
        Err(SketchError::validation(format!(
            "unsupported color syntax \"{s}\""
        )))
    }
}

fn parse_hex(s: &str) -> SketchResult<Color> {
    fn hex_byte(pair: &str) -> SketchResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SketchError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(SketchError::validation("hex color must be ascii"));
    }
    match s.len() {
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(SketchError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn parse_rgb_fn(body: &str) -> SketchResult<Color> {
    fn channel(v: &str) -> SketchResult<u8> {
        let x: f64 = v
            .trim()
            .parse()
            .map_err(|_| SketchError::validation(format!("invalid color channel \"{v}\"")))?;
        if !(0.0..=255.0).contains(&x) {
            return Err(SketchError::validation(format!(
                "color channel {x} out of range 0..=255"
            )));
        }
        Ok(x.round() as u8)
    }

    let parts: Vec<&str> = body.split(',').collect();
    match parts.as_slice() {
        [r, g, b] => Ok(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let a: f64 = a
                .trim()
                .parse()
                .map_err(|_| SketchError::validation(format!("invalid alpha \"{a}\"")))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(SketchError::validation("alpha must be within 0..=1"));
            }
            Ok(Color::rgba(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (a * 255.0).round() as u8,
            ))
        }
        _ => Err(SketchError::validation(
            "rgb()/rgba() expects 3 or 4 comma separated values",
        )),
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
