use crate::gl::error::ShaderError;

/// Convenience result type used across sketchbook.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy used by sketchbook APIs.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-provided arguments or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image decoding or image resource failures.
    #[error("image error: {0}")]
    Image(String),

    /// Font registration or text layout failures.
    #[error("text error: {0}")]
    Text(String),

    /// Surface rasterization failures.
    #[error("render error: {0}")]
    Render(String),

    /// GPU shader compile or link failure.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`SketchError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`SketchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
