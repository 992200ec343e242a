use std::fmt;

/// Pipeline stage a shader source belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Failure building a GPU program. Carries the driver's info log verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("failed to create {stage} shader object: {reason}")]
    Create { stage: ShaderStage, reason: String },

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    Link { log: String },

    /// Any other GL object allocation failure (program, buffer, texture, vertex array).
    #[error("failed to allocate GL {what}: {reason}")]
    Allocate { what: &'static str, reason: String },
}
