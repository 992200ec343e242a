use crate::{
    assets::image::Image,
    foundation::{
        core::{Affine, BezPath, Point, Rect},
        error::SketchResult,
    },
    paint::{color::Color, state::TextAlign},
    render::text::Font,
};

/// Text parameters handed to [`Surface::fill_text`].
#[derive(Clone, Copy, Debug)]
pub struct TextStyle<'a> {
    pub font: &'a Font,
    pub size: f64,
    pub align: TextAlign,
    pub color: Color,
}

/// A 2D raster drawing target.
///
/// This is the whole contract the drawing layer relies on: a save/restore transform stack,
/// path fill and stroke, text, image blits and an explicit frame commit. Any backend that
/// implements it can sit under a [`crate::Canvas`].
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Push the current transform.
    fn save(&mut self);
    /// Pop the transform pushed by the matching [`Surface::save`]. Unbalanced calls are ignored.
    fn restore(&mut self);
    /// Post-multiply the current transform (`current = current * affine`).
    fn concat_transform(&mut self, affine: Affine);
    fn current_transform(&self) -> Affine;

    fn translate(&mut self, x: f64, y: f64) {
        self.concat_transform(Affine::translate((x, y)));
    }

    fn rotate(&mut self, radians: f64) {
        self.concat_transform(Affine::rotate(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.concat_transform(Affine::scale_non_uniform(sx, sy));
    }

    /// Fill the whole surface with `color`, ignoring the current transform.
    fn clear(&mut self, color: Color);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draw `text` with its first baseline at `baseline`; `x` is interpreted per `style.align`.
    fn fill_text(&mut self, text: &str, baseline: Point, style: &TextStyle<'_>)
    -> SketchResult<()>;

    /// Blit `image` stretched into `dest` (local coordinates).
    fn draw_image(&mut self, image: &Image, dest: Rect);

    /// Commit everything drawn since the previous commit.
    fn end_frame(&mut self) -> SketchResult<()>;
}
