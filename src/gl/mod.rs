//! Thin GPU path: shader programs, textures and a single-quad sprite renderer on top of
//! [`glow`]. Only the matrix math and error types are built without the `gl` feature.

pub(crate) mod error;
pub(crate) mod math;

#[cfg(feature = "gl")]
#[allow(unsafe_code)]
pub(crate) mod shader;
#[cfg(feature = "gl")]
#[allow(unsafe_code)]
pub(crate) mod sprite;
#[cfg(feature = "gl")]
#[allow(unsafe_code)]
pub(crate) mod texture;
