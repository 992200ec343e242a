use glow::HasContext;

use crate::{assets::image::Image, gl::error::ShaderError};

/// RGBA8 2D texture with linear filtering and edge clamping.
#[derive(Debug)]
pub struct Texture<G: HasContext> {
    raw: G::Texture,
    width: u32,
    height: u32,
}

impl<G: HasContext> Texture<G> {
    /// Upload an [`Image`]. Pixels stay premultiplied, so blend with `ONE, ONE_MINUS_SRC_ALPHA`.
    pub fn from_image(gl: &G, image: &Image) -> Result<Self, ShaderError> {
        let (w, h) = dims(image)?;
        unsafe {
            let raw = gl.create_texture().map_err(|reason| ShaderError::Allocate {
                what: "texture",
                reason,
            })?;
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                w,
                h,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(image.rgba8_premul.as_slice()),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(Self {
                raw,
                width: image.width,
                height: image.height,
            })
        }
    }

    pub fn bind(&self, gl: &G) {
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(self.raw)) };
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn delete(self, gl: &G) {
        unsafe { gl.delete_texture(self.raw) };
    }
}

fn dims(image: &Image) -> Result<(i32, i32), ShaderError> {
    let conv = |v: u32| {
        i32::try_from(v).map_err(|_| ShaderError::Allocate {
            what: "texture",
            reason: format!("dimension {v} exceeds i32"),
        })
    };
    Ok((conv(image.width)?, conv(image.height)?))
}
