use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::Size,
    error::{SketchError, SketchResult},
};

/// Settings for running a sketch headless or interactively.
///
/// Loaded from JSON; every field has a default so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub frame_rate: f64,
    /// Seed for the sketch random generator.
    pub seed: u64,
    /// Font file used for `text` (TTF/OTF). Text is skipped without one.
    pub font: Option<PathBuf>,
    /// Optional image shown by sketches that use one.
    pub image: Option<PathBuf>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            frame_rate: 60.0,
            seed: 1,
            font: None,
            image: None,
        }
    }
}

impl SketchConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SketchError::validation(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn validate(&self) -> SketchResult<()> {
        self.size().to_u16()?;
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(SketchError::validation(
                "frame_rate must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Apply `SKETCHBOOK_FRAME_RATE` and `SKETCHBOOK_SEED` when set and parseable.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(fps) = lookup("SKETCHBOOK_FRAME_RATE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
        {
            self.frame_rate = fps;
        }
        if let Some(seed) = lookup("SKETCHBOOK_SEED").and_then(|v| v.parse::<u64>().ok()) {
            self.seed = seed;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
