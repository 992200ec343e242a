//! Immediate-mode 2D sketching.
//!
//! A [`Canvas`] owns its [`DrawingState`] (fill, stroke, rotation, text settings) and a
//! [`Surface`] to paint on; primitives read the state at call time. [`CpuSurface`] rasterizes
//! with `vello_cpu` and keeps the committed frame between ticks. A [`Runner`] drives a
//! [`Sketch`] at a fixed frame rate from a [`Clock`], which makes headless runs on a
//! [`ManualClock`] fully deterministic.
//!
//! With the `gl` feature, a small `glow`-based path adds shader programs, textures and a
//! sprite renderer.
#![deny(unsafe_code)]

mod assets;
mod draw;
mod foundation;
mod gl;
mod paint;
mod render;
mod sketch;
mod sketches;

pub use assets::{
    bitmap::Bitmap,
    image::{Image, ImageHandle, decode_image, load_image},
};
pub use draw::canvas::Canvas;
pub use foundation::{
    config::SketchConfig,
    core::{Affine, BezPath, HALF_PI, PI, Point, QUARTER_PI, Rect, Size, TWO_PI, Vec2},
    error::{SketchError, SketchResult},
};
pub use gl::{
    error::{ShaderError, ShaderStage},
    math::{
        IDENTITY4, Mat4, QUAD_STRIDE_BYTES, QUAD_VERTEX_COUNT, QUAD_VERTICES, affine_to_mat4,
        ortho, screen_projection, sprite_affine, sprite_model, transform_point,
    },
};
#[cfg(feature = "gl")]
pub use gl::{
    shader::Shader,
    sprite::{SPRITE_FRAGMENT_SRC, SPRITE_VERTEX_SRC, SpriteRenderer},
    texture::Texture,
};
pub use paint::{
    color::{
        BLACK, BLUE, Color, GRAY, GREEN, ORANGE, PINK, PURPLE, RED, TEAL, WHITE, YELLOW,
        make_color,
    },
    state::{AngleMode, DrawingState, TextAlign},
};
pub use render::{
    cpu::CpuSurface,
    frame::FrameRGBA,
    surface::{Surface, TextStyle},
    text::Font,
};
pub use sketch::{
    app::{Context, Pointer, Sketch},
    random::Random,
    runner::Runner,
    scheduler::{Clock, FrameLoop, LoopState, ManualClock, SystemClock},
};
pub use sketches::{
    BuiltinSketch,
    caterpillar::{Caterpillar, CaterpillarRace},
    flappy::{Flappy, Pipe},
    garden::{Flower, Garden},
};
