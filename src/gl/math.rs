use crate::foundation::core::{Affine, Vec2};

/// Column-major 4×4 matrix, the layout `glUniformMatrix4fv` expects with `transpose = false`.
pub type Mat4 = [f32; 16];

pub const IDENTITY4: Mat4 = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Unit quad as two triangles, 4 floats per vertex: `pos.xy, uv.xy`.
pub const QUAD_VERTICES: [f32; 24] = [
    0.0, 1.0, 0.0, 1.0, //
    1.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, //
    1.0, 0.0, 1.0, 0.0,
];

pub const QUAD_VERTEX_COUNT: i32 = 6;
pub const QUAD_STRIDE_BYTES: i32 = 4 * std::mem::size_of::<f32>() as i32;

/// Orthographic projection (same convention as `glOrtho`).
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let fnr = far - near;
    [
        2.0 / rl,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / tb,
        0.0,
        0.0,
        0.0,
        0.0,
        -2.0 / fnr,
        0.0,
        -(right + left) / rl,
        -(top + bottom) / tb,
        -(far + near) / fnr,
        1.0,
    ]
}

/// Projection for a `width`×`height` viewport with y pointing down.
pub fn screen_projection(width: f32, height: f32) -> Mat4 {
    ortho(0.0, width, height, 0.0, -1.0, 1.0)
}

/// Embed a 2D affine in the xy plane of a 4×4 matrix.
pub fn affine_to_mat4(a: Affine) -> Mat4 {
    let [a, b, c, d, e, f] = a.as_coeffs().map(|v| v as f32);
    [
        a, b, 0.0, 0.0, //
        c, d, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        e, f, 0.0, 1.0,
    ]
}

/// Model transform mapping the unit quad onto a `size` rectangle at `pos`, rotated by
/// `rotation` radians about the rectangle center.
pub fn sprite_affine(pos: Vec2, size: Vec2, rotation: f64) -> Affine {
    let half = size * 0.5;
    Affine::translate(pos)
        * Affine::translate(half)
        * Affine::rotate(rotation)
        * Affine::translate(-half)
        * Affine::scale_non_uniform(size.x, size.y)
}

pub fn sprite_model(pos: Vec2, size: Vec2, rotation: f64) -> Mat4 {
    affine_to_mat4(sprite_affine(pos, size, rotation))
}

/// `m * v` for a column-major matrix.
pub fn transform_point(m: &Mat4, v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = (0..4).map(|col| m[col * 4 + row] * v[col]).sum();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/gl/math.rs"]
mod tests;
