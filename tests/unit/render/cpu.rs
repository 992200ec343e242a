use super::*;
use crate::paint::color::{BLACK, BLUE, RED, WHITE};

fn surface(w: u32, h: u32) -> CpuSurface {
    CpuSurface::new(Size::new(w, h)).unwrap()
}

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    use kurbo::Shape as _;
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

#[test]
fn zero_sized_surface_is_rejected() {
    assert!(CpuSurface::new(Size::new(0, 10)).is_err());
    assert!(CpuSurface::new(Size::new(70_000, 10)).is_err());
}

#[test]
fn new_surface_is_transparent() {
    let mut s = surface(4, 4);
    let f = s.snapshot().unwrap();
    assert_eq!(f.data.len(), 4 * 4 * 4);
    assert!(f.data.iter().all(|&v| v == 0));
}

#[test]
fn opaque_clear_fills_every_pixel() {
    let mut s = surface(3, 2);
    s.clear(BLUE);
    let f = s.snapshot().unwrap();
    for px in f.data.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 255, 255]);
    }
}

#[test]
fn opaque_clear_discards_pending_drawing() {
    let mut s = surface(8, 8);
    s.fill_path(&rect_path(0.0, 0.0, 8.0, 8.0), RED);
    s.clear(WHITE);
    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(4, 4), Some([255, 255, 255, 255]));
}

#[test]
fn translucent_clear_composites_over_existing_pixels() {
    let mut s = surface(2, 2);
    s.clear(WHITE);
    s.clear(BLACK.with_alpha(128));
    let px = s.snapshot().unwrap().pixel(0, 0).unwrap();
    assert_eq!(px[3], 255);
    assert!((126..=128).contains(&px[0]), "{px:?}");
}

#[test]
fn fill_path_respects_current_transform() {
    let mut s = surface(20, 20);
    s.clear(WHITE);
    s.save();
    s.translate(10.0, 10.0);
    s.fill_path(&rect_path(0.0, 0.0, 5.0, 5.0), RED);
    s.restore();
    assert_eq!(s.current_transform(), Affine::IDENTITY);

    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(12, 12), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(2, 2), Some([255, 255, 255, 255]));
}

#[test]
fn frames_accumulate_between_commits() {
    let mut s = surface(10, 10);
    s.fill_path(&rect_path(0.0, 0.0, 5.0, 10.0), RED);
    s.end_frame().unwrap();
    s.fill_path(&rect_path(5.0, 0.0, 10.0, 10.0), BLUE);
    s.end_frame().unwrap();

    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(2, 5), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(7, 5), Some([0, 0, 255, 255]));
}

#[test]
fn stroke_covers_the_outline_not_the_interior() {
    let mut s = surface(20, 20);
    s.clear(WHITE);
    s.stroke_path(&rect_path(4.0, 4.0, 16.0, 16.0), BLACK, 2.0);
    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(4, 10), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(10, 10), Some([255, 255, 255, 255]));
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut s = surface(2, 2);
    s.translate(1.0, 0.0);
    s.restore();
    assert_eq!(s.current_transform(), Affine::translate((1.0, 0.0)));
}

#[test]
fn draw_image_stretches_into_destination() {
    let mut s = surface(8, 8);
    s.clear(WHITE);
    let img = Image::from_straight_rgba8(1, 1, vec![255, 0, 0, 255]).unwrap();
    s.draw_image(&img, Rect::new(2.0, 2.0, 6.0, 6.0));
    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(4, 4), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(7, 7), Some([255, 255, 255, 255]));
}

#[test]
fn pixmap_conversion_checks_lengths() {
    assert!(image_premul_bytes_to_pixmap(&[0; 8], 1, 1).is_err());
    assert!(image_premul_bytes_to_pixmap(&[0; 4], 70_000, 1).is_err());
    let pm = image_premul_bytes_to_pixmap(&[10, 20, 30, 40], 1, 1).unwrap();
    assert_eq!(pm.data_as_u8_slice(), &[10, 20, 30, 40]);
}
