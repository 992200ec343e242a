use kurbo::Shape as _;

use crate::{
    assets::image::ImageHandle,
    foundation::{
        core::{Affine, BezPath, Point, Rect, Size},
        error::SketchResult,
    },
    paint::{
        color::Color,
        state::{AngleMode, DrawingState, TextAlign},
    },
    render::{
        cpu::CpuSurface,
        frame::FrameRGBA,
        surface::{Surface, TextStyle},
        text::Font,
    },
};

const CURVE_TOLERANCE: f64 = 0.1;
/// Upper bound on the lines a single `grid` call may emit.
const MAX_GRID_LINES: usize = 8192;

/// Immediate-mode drawing handle: a [`DrawingState`] plus the [`Surface`] it paints on.
///
/// Every primitive reads the state at call time, wraps its work in a surface save/restore, and
/// never returns an error; problems (missing font, invalid grid) are logged and the call is
/// skipped.
#[derive(Debug)]
pub struct Canvas<S: Surface = CpuSurface> {
    state: DrawingState,
    surface: S,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: DrawingState::default(),
            surface,
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn fill(&mut self, color: Color) {
        self.state.set_fill(color);
    }

    pub fn stroke(&mut self, color: Color) {
        self.state.set_stroke(color);
    }

    pub fn no_fill(&mut self) {
        self.state.clear_fill();
    }

    pub fn no_stroke(&mut self) {
        self.state.clear_stroke();
    }

    pub fn line_width(&mut self, px: f64) {
        self.state.set_line_width(px);
    }

    pub fn text_size(&mut self, px: f64) {
        self.state.set_text_size(px);
    }

    pub fn text_align(&mut self, align: TextAlign) {
        self.state.set_text_align(align);
    }

    pub fn angle_mode(&mut self, mode: AngleMode) {
        self.state.set_angle_mode(mode);
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.font = Some(font);
    }

    /// Set the ambient rotation, in the current angle mode.
    pub fn rotate(&mut self, angle: f64) {
        self.state.set_rotation(angle);
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation()
    }

    pub fn add_rotation(&mut self, delta: f64) {
        self.state.add_rotation(delta);
    }

    /// Fill the whole surface, ignoring transform and rotation.
    pub fn background(&mut self, color: Color) {
        self.surface.clear(color);
    }

    /// A `size`×`size` filled square with its top-left corner at `(x, y)`.
    pub fn point(&mut self, x: f64, y: f64, size: f64) {
        let Some(fill) = self.state.fill else {
            return;
        };
        let path = Rect::new(x, y, x + size, y + size).to_path(CURVE_TOLERANCE);
        self.surface.save();
        self.surface.fill_path(&path, fill);
        self.surface.restore();
    }

    pub fn point1(&mut self, x: f64, y: f64) {
        self.point(x, y, 1.0);
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let mut path = BezPath::new();
        path.move_to((x1, y1));
        path.line_to((x2, y2));
        self.stroke_with_state(&path);
    }

    /// Closed outline through the three corners.
    pub fn triangle(&mut self, p1: Point, p2: Point, p3: Point) {
        let mut path = BezPath::new();
        path.move_to(p1);
        path.line_to(p2);
        path.line_to(p3);
        path.close_path();
        self.stroke_with_state(&path);
    }

    /// Filled rectangle, rotated about its center by the ambient rotation.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let Some(fill) = self.state.fill else {
            return;
        };
        let path = Rect::new(x, y, x + w, y + h).to_path(CURVE_TOLERANCE);
        let pivot = Point::new(x + w / 2.0, y + h / 2.0);
        self.surface.save();
        self.rotate_about(pivot);
        self.surface.fill_path(&path, fill);
        self.surface.restore();
    }

    pub fn square(&mut self, x: f64, y: f64, side: f64) {
        self.rect(x, y, side, side);
    }

    pub fn circle(&mut self, x: f64, y: f64, radius: f64) {
        let Some(fill) = self.state.fill else {
            return;
        };
        let path = kurbo::Circle::new((x, y), radius).to_path(CURVE_TOLERANCE);
        self.surface.save();
        self.surface.fill_path(&path, fill);
        self.surface.restore();
    }

    /// Filled ellipse centered at `(x, y)`, rotated about that center.
    pub fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64) {
        let Some(fill) = self.state.fill else {
            return;
        };
        let path = kurbo::Ellipse::new((x, y), (radius_x, radius_y), 0.0).to_path(CURVE_TOLERANCE);
        self.surface.save();
        self.rotate_about(Point::new(x, y));
        self.surface.fill_path(&path, fill);
        self.surface.restore();
    }

    /// Fill `text` with its baseline at `y + size`. `size` falls back to the state's text size.
    pub fn text(&mut self, text: &str, x: f64, y: f64, size: Option<f64>) {
        let Some(fill) = self.state.fill else {
            return;
        };
        let Some(font) = self.state.font.as_ref() else {
            tracing::debug!(text, "no font set; text skipped");
            return;
        };
        let size = size.unwrap_or(self.state.text_size);
        let style = TextStyle {
            font,
            size,
            align: self.state.text_align,
            color: fill,
        };

        self.surface.save();
        let res = self
            .surface
            .fill_text(text, Point::new(x, y + size), &style);
        self.surface.restore();
        if let Err(e) = res {
            tracing::error!(error = %e, text, "text layout failed");
        }
    }

    /// Stroke grid lines at every multiple of the cell size inside the surface. Cell sizes so
    /// small that the grid would need more than 8192 lines are skipped with a warning.
    pub fn grid(&mut self, cell_width: f64, cell_height: f64) {
        if !(cell_width > 0.0 && cell_height > 0.0) {
            tracing::warn!(cell_width, cell_height, "grid cell size must be > 0; skipped");
            return;
        }
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let columns = (w / cell_width).ceil();
        let rows = (h / cell_height).ceil();
        if columns + rows > MAX_GRID_LINES as f64 {
            tracing::warn!(
                cell_width,
                cell_height,
                max_lines = MAX_GRID_LINES,
                "grid would exceed the line limit; skipped"
            );
            return;
        }

        let mut path = BezPath::new();
        for i in 0..columns as usize {
            let x = i as f64 * cell_width;
            path.move_to((x, 0.0));
            path.line_to((x, h));
        }
        for j in 0..rows as usize {
            let y = j as f64 * cell_height;
            path.move_to((0.0, y));
            path.line_to((w, y));
        }
        self.stroke_with_state(&path);
    }

    /// Blit a loaded image at `(x, y)`, native size unless `w`/`h` are given, rotated about its
    /// center. Skipped while the image is still loading.
    pub fn image(&mut self, handle: &ImageHandle, x: f64, y: f64, w: Option<f64>, h: Option<f64>) {
        let Some(image) = handle.get() else {
            tracing::debug!("image not ready; skipped");
            return;
        };
        let w = w.unwrap_or(f64::from(image.width));
        let h = h.unwrap_or(f64::from(image.height));

        self.surface.save();
        self.rotate_about(Point::new(x + w / 2.0, y + h / 2.0));
        self.surface.draw_image(image, Rect::new(x, y, x + w, y + h));
        self.surface.restore();
    }

    /// Commit the frame on the underlying surface.
    pub fn end_frame(&mut self) -> SketchResult<()> {
        self.surface.end_frame()
    }

    fn stroke_with_state(&mut self, path: &BezPath) {
        let Some(stroke) = self.state.stroke else {
            return;
        };
        self.surface.save();
        self.surface.stroke_path(path, stroke, self.state.line_width);
        self.surface.restore();
    }

    fn rotate_about(&mut self, pivot: Point) {
        let radians = self.state.rotation_radians();
        if radians == 0.0 {
            return;
        }
        self.surface
            .concat_transform(Affine::rotate_about(radians, pivot));
    }
}

impl Canvas<CpuSurface> {
    /// Canvas on a fresh CPU surface of the given size.
    pub fn cpu(size: Size) -> SketchResult<Self> {
        Ok(Self::new(CpuSurface::new(size)?))
    }

    /// Commit pending drawing and read the pixels back.
    pub fn snapshot(&mut self) -> SketchResult<FrameRGBA> {
        self.surface.snapshot()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/canvas.rs"]
mod tests;
