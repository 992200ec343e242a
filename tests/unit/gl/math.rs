use super::*;

fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4)
}

#[test]
fn screen_projection_maps_corners_to_clip_space() {
    let p = screen_projection(800.0, 600.0);
    assert!(approx(transform_point(&p, [0.0, 0.0, 0.0, 1.0]), [-1.0, 1.0, 0.0, 1.0]));
    assert!(approx(transform_point(&p, [800.0, 600.0, 0.0, 1.0]), [1.0, -1.0, 0.0, 1.0]));
    assert!(approx(transform_point(&p, [400.0, 300.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]));
}

#[test]
fn affine_embedding_matches_identity() {
    assert_eq!(affine_to_mat4(Affine::IDENTITY), IDENTITY4);
    let m = affine_to_mat4(Affine::translate((3.0, -2.0)));
    assert!(approx(transform_point(&m, [1.0, 1.0, 0.0, 1.0]), [4.0, -1.0, 0.0, 1.0]));
}

#[test]
fn unrotated_sprite_maps_unit_quad_onto_rect() {
    let m = sprite_model(Vec2::new(100.0, 50.0), Vec2::new(200.0, 80.0), 0.0);
    assert!(approx(transform_point(&m, [0.0, 0.0, 0.0, 1.0]), [100.0, 50.0, 0.0, 1.0]));
    assert!(approx(transform_point(&m, [1.0, 1.0, 0.0, 1.0]), [300.0, 130.0, 0.0, 1.0]));
}

#[test]
fn rotated_sprite_pivots_about_its_center() {
    let m = sprite_model(
        Vec2::new(100.0, 100.0),
        Vec2::new(200.0, 200.0),
        std::f64::consts::FRAC_PI_2,
    );
    // center stays put
    assert!(approx(transform_point(&m, [0.5, 0.5, 0.0, 1.0]), [200.0, 200.0, 0.0, 1.0]));
    // top-left corner swings to top-right
    assert!(approx(transform_point(&m, [0.0, 0.0, 0.0, 1.0]), [300.0, 100.0, 0.0, 1.0]));
}

#[test]
fn quad_covers_unit_square_with_matching_uvs() {
    assert_eq!(QUAD_VERTICES.len() as i32, QUAD_VERTEX_COUNT * 4);
    for v in QUAD_VERTICES.chunks_exact(4) {
        assert_eq!(v[0], v[2]);
        assert_eq!(v[1], v[3]);
    }
    assert_eq!(QUAD_STRIDE_BYTES, 16);
}
