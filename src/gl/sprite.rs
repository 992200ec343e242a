use glow::HasContext;

use crate::{
    foundation::core::Vec2,
    gl::{
        error::ShaderError,
        math::{QUAD_STRIDE_BYTES, QUAD_VERTEX_COUNT, QUAD_VERTICES, screen_projection, sprite_model},
        shader::Shader,
        texture::Texture,
    },
    paint::color::Color,
};

/// Vertex stage matching [`QUAD_VERTICES`] and the uniforms [`SpriteRenderer`] sets.
pub const SPRITE_VERTEX_SRC: &str = r#"#version 300 es
layout (location = 0) in vec4 vertex;
out vec2 TexCoords;
uniform mat4 model;
uniform mat4 projection;
void main() {
    TexCoords = vertex.zw;
    gl_Position = projection * model * vec4(vertex.xy, 0.0, 1.0);
}
"#;

pub const SPRITE_FRAGMENT_SRC: &str = r#"#version 300 es
precision mediump float;
in vec2 TexCoords;
out vec4 color;
uniform sampler2D image;
uniform vec3 spriteColor;
void main() {
    color = vec4(spriteColor, 1.0) * texture(image, TexCoords);
}
"#;

/// Draws textured, tinted, rotated quads with a single static vertex buffer.
#[derive(Debug)]
pub struct SpriteRenderer<G: HasContext> {
    shader: Shader<G>,
    vao: G::VertexArray,
    vbo: G::Buffer,
}

impl<G: HasContext> SpriteRenderer<G> {
    /// Build the unit-quad buffers and set a y-down projection for the viewport.
    pub fn new(gl: &G, shader: Shader<G>, viewport_w: f32, viewport_h: f32) -> Result<Self, ShaderError> {
        shader.set_matrix4(gl, "projection", &screen_projection(viewport_w, viewport_h), true);
        shader.set_i32(gl, "image", 0, false);

        unsafe {
            let vao = gl.create_vertex_array().map_err(|reason| ShaderError::Allocate {
                what: "vertex array",
                reason,
            })?;
            let vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(reason) => {
                    gl.delete_vertex_array(vao);
                    return Err(ShaderError::Allocate {
                        what: "buffer",
                        reason,
                    });
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            let bytes: Vec<u8> = QUAD_VERTICES.iter().flat_map(|v| v.to_ne_bytes()).collect();
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &bytes, glow::STATIC_DRAW);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 4, glow::FLOAT, false, QUAD_STRIDE_BYTES, 0);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { shader, vao, vbo })
        }
    }

    pub fn shader(&self) -> &Shader<G> {
        &self.shader
    }

    /// Draw `texture` stretched to `size` at `pos`, rotated about its center and tinted by
    /// `tint` (alpha ignored).
    pub fn draw_sprite(
        &self,
        gl: &G,
        texture: &Texture<G>,
        pos: Vec2,
        size: Vec2,
        rotation: f64,
        tint: Color,
    ) {
        self.shader.use_program(gl);
        let model = sprite_model(pos, size, rotation);
        self.shader.set_matrix4(gl, "model", &model, false);
        let rgb = [tint.r, tint.g, tint.b].map(|c| f32::from(c) / 255.0);
        self.shader.set_vec3(gl, "spriteColor", rgb, false);

        unsafe {
            gl.active_texture(glow::TEXTURE0);
        }
        texture.bind(gl);
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, QUAD_VERTEX_COUNT);
            gl.bind_vertex_array(None);
        }
    }

    pub fn delete(self, gl: &G) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
        self.shader.delete(gl);
    }
}
