use super::*;
use crate::{
    assets::image::Image,
    paint::color::{BLACK, BLUE, RED, WHITE, make_color},
};

/// Records what primitives hand to the surface.
#[derive(Debug, Default)]
struct Recorder {
    transform: Affine,
    stack: Vec<Affine>,
    fills: Vec<(BezPath, Color, Affine)>,
    strokes: Vec<(BezPath, Color, f64)>,
    images: Vec<(Rect, Affine)>,
    clears: Vec<Color>,
    texts: Vec<(String, Point, f64, TextAlign, Color)>,
}

impl Surface for Recorder {
    fn width(&self) -> u32 {
        50
    }

    fn height(&self) -> u32 {
        30
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn concat_transform(&mut self, affine: Affine) {
        self.transform *= affine;
    }

    fn current_transform(&self) -> Affine {
        self.transform
    }

    fn clear(&mut self, color: Color) {
        self.clears.push(color);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.fills.push((path.clone(), color, self.transform));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.strokes.push((path.clone(), color, width));
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle<'_>,
    ) -> SketchResult<()> {
        self.texts.push((
            text.to_string(),
            baseline,
            style.size,
            style.align,
            style.color,
        ));
        Ok(())
    }

    fn draw_image(&mut self, _image: &Image, dest: Rect) {
        self.images.push((dest, self.transform));
    }

    fn end_frame(&mut self) -> SketchResult<()> {
        Ok(())
    }
}

fn approx_point(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn solid(c: Color) -> [u8; 4] {
    c.premultiplied()
}

#[test]
fn red_rect_on_blank_surface_is_an_exact_block() {
    let mut canvas = Canvas::cpu(Size::new(100, 100)).unwrap();
    canvas.background(WHITE);
    canvas.fill(make_color(255, 0, 0, None));
    canvas.rect(10.0, 10.0, 20.0, 20.0);
    let frame = canvas.snapshot().unwrap();

    for y in 0..100 {
        for x in 0..100 {
            let inside = (10..30).contains(&x) && (10..30).contains(&y);
            let want = if inside { solid(RED) } else { solid(WHITE) };
            assert_eq!(frame.pixel(x, y), Some(want), "at ({x},{y})");
        }
    }
}

#[test]
fn rect_and_square_render_identically() {
    let mut a = Canvas::cpu(Size::new(64, 64)).unwrap();
    let mut b = Canvas::cpu(Size::new(64, 64)).unwrap();
    for c in [&mut a, &mut b] {
        c.background(WHITE);
        c.fill(BLUE);
        c.rotate(30.0);
    }
    a.rect(12.0, 8.0, 25.0, 25.0);
    b.square(12.0, 8.0, 25.0);
    assert_eq!(a.snapshot().unwrap().data, b.snapshot().unwrap().data);
}

#[test]
fn rect_rotates_about_its_center() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.rotate(90.0);
    canvas.rect(10.0, 20.0, 4.0, 6.0);

    let (_, color, t) = &canvas.surface().fills[0];
    assert_eq!(*color, BLACK);
    let center = Point::new(12.0, 23.0);
    assert!(approx_point(*t * center, center));
    assert!(approx_point(*t * Point::new(12.0, 20.0), Point::new(15.0, 23.0)));
    // transform is restored afterwards
    assert_eq!(canvas.surface().current_transform(), Affine::IDENTITY);
}

#[test]
fn ellipse_rotates_about_its_center_point() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.angle_mode(AngleMode::Radians);
    canvas.rotate(crate::foundation::core::HALF_PI);
    canvas.ellipse(5.0, 5.0, 3.0, 1.0);
    let (_, _, t) = &canvas.surface().fills[0];
    assert!(approx_point(*t * Point::new(5.0, 5.0), Point::new(5.0, 5.0)));
}

#[test]
fn fill_and_stroke_modes_follow_primitive() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.line_width(3.0);
    canvas.point1(1.0, 1.0);
    canvas.circle(5.0, 5.0, 2.0);
    canvas.line(0.0, 0.0, 10.0, 10.0);
    canvas.triangle(
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
    );
    let s = canvas.surface();
    assert_eq!(s.fills.len(), 2);
    assert_eq!(s.strokes.len(), 2);
    assert!(s.strokes.iter().all(|(_, _, w)| *w == 3.0));
}

#[test]
fn cleared_paint_skips_primitives() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.no_fill();
    canvas.no_stroke();
    canvas.rect(0.0, 0.0, 5.0, 5.0);
    canvas.circle(0.0, 0.0, 5.0);
    canvas.line(0.0, 0.0, 5.0, 5.0);
    canvas.grid(10.0, 10.0);
    assert!(canvas.surface().fills.is_empty());
    assert!(canvas.surface().strokes.is_empty());

    canvas.fill(RED);
    canvas.rect(0.0, 0.0, 5.0, 5.0);
    assert_eq!(canvas.surface().fills[0].1, RED);
}

#[test]
fn grid_draws_lines_at_cell_multiples_inside_surface() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.grid(10.0, 10.0);
    let (path, _, _) = &canvas.surface().strokes[0];
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    // x = 0..40 (5 lines), y = 0..20 (3 lines)
    assert_eq!(moves, 8);
}

#[test]
fn grid_with_non_positive_cell_is_skipped() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.grid(0.0, 10.0);
    canvas.grid(10.0, -1.0);
    canvas.grid(f64::NAN, 10.0);
    assert!(canvas.surface().strokes.is_empty());
}

#[test]
fn grid_with_uneven_cells_covers_the_partial_last_cell() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.grid(15.0, 7.0);
    let (path, _, _) = &canvas.surface().strokes[0];
    let starts: Vec<Point> = path
        .elements()
        .iter()
        .filter_map(|el| match el {
            kurbo::PathEl::MoveTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    // x = 0, 15, 30, 45 and y = 0, 7, 14, 21, 28
    assert_eq!(starts.len(), 4 + 5);
    assert!(approx_point(starts[3], Point::new(45.0, 0.0)));
    assert!(approx_point(starts[8], Point::new(0.0, 28.0)));
}

#[test]
fn grid_with_tiny_cells_is_capped() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.grid(1e-9, 10.0);
    canvas.grid(10.0, 1e-300);
    assert!(canvas.surface().strokes.is_empty());

    // thousands of lines are still fine
    canvas.grid(50.0 / 8000.0, 10.0);
    assert_eq!(canvas.surface().strokes.len(), 1);
}

#[test]
fn background_ignores_rotation() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.rotate(45.0);
    canvas.background(WHITE);
    assert_eq!(canvas.surface().clears, vec![WHITE]);
}

#[test]
fn text_without_font_is_skipped() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.text("hello", 0.0, 0.0, None);
    assert!(canvas.surface().fills.is_empty());
    assert!(canvas.surface().texts.is_empty());
}

fn any_font() -> Font {
    Font::from_bytes(vec![0; 4]).unwrap()
}

#[test]
fn text_baseline_sits_one_size_below_y() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.set_font(any_font());
    canvas.fill(BLUE);
    canvas.text("state size", 5.0, 10.0, None);
    canvas.text("explicit size", 100.0, 20.0, Some(30.0));

    let texts = &canvas.surface().texts;
    assert_eq!(texts.len(), 2);
    let (s, baseline, size, align, color) = &texts[0];
    assert_eq!(s, "state size");
    assert!(approx_point(*baseline, Point::new(5.0, 30.0)));
    assert_eq!(*size, 20.0);
    assert_eq!(*align, TextAlign::Left);
    assert_eq!(*color, BLUE);

    let (_, baseline, size, _, _) = &texts[1];
    assert!(approx_point(*baseline, Point::new(100.0, 50.0)));
    assert_eq!(*size, 30.0);
}

#[test]
fn text_alignment_is_handed_to_the_surface() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.set_font(any_font());
    canvas.text_size(12.0);
    for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
        canvas.text_align(align);
        canvas.text("HH", 100.0, 20.0, None);
    }
    let texts = &canvas.surface().texts;
    let aligns: Vec<TextAlign> = texts.iter().map(|t| t.3).collect();
    assert_eq!(
        aligns,
        vec![TextAlign::Left, TextAlign::Center, TextAlign::Right]
    );
    // x stays the anchor; the surface applies the alignment offset
    assert!(
        texts
            .iter()
            .all(|t| approx_point(t.1, Point::new(100.0, 32.0)))
    );
}

#[test]
fn text_with_cleared_fill_is_skipped() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.set_font(any_font());
    canvas.no_fill();
    canvas.text("hidden", 0.0, 0.0, None);
    assert!(canvas.surface().texts.is_empty());
}

#[test]
fn image_is_skipped_until_ready() {
    let mut canvas = Canvas::new(Recorder::default());
    let pending = ImageHandle::default();
    canvas.image(&pending, 0.0, 0.0, None, None);
    assert!(canvas.surface().images.is_empty());

    let ready = ImageHandle::from_image(
        Image::from_straight_rgba8(4, 2, vec![255; 4 * 2 * 4]).unwrap(),
    );
    canvas.rotate(180.0);
    canvas.image(&ready, 10.0, 10.0, None, None);
    canvas.image(&ready, 0.0, 0.0, Some(8.0), Some(8.0));

    let images = &canvas.surface().images;
    assert_eq!(images[0].0, Rect::new(10.0, 10.0, 14.0, 12.0));
    let center = Point::new(12.0, 11.0);
    assert!(approx_point(images[0].1 * center, center));
    assert_eq!(images[1].0, Rect::new(0.0, 0.0, 8.0, 8.0));
}

#[test]
fn rotation_helpers_forward_to_state() {
    let mut canvas = Canvas::new(Recorder::default());
    canvas.rotate(300.0);
    canvas.add_rotation(60.0);
    assert_eq!(canvas.rotation(), 0.0);
    canvas.text_size(32.0);
    canvas.text_align(TextAlign::Center);
    assert_eq!(canvas.state().text_size, 32.0);
    assert_eq!(canvas.state().text_align, TextAlign::Center);
}
