use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::image::Image,
    foundation::{
        core::{Affine, BezPath, Point, Rect, Size},
        error::{SketchError, SketchResult},
    },
    paint::{color::Color, state::TextAlign},
    render::{
        composite::{over_in_place, over_solid_in_place},
        frame::FrameRGBA,
        surface::{Surface, TextStyle},
        text::TextLayoutEngine,
    },
};

const IMAGE_CACHE_CAPACITY: usize = 32;

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext`; [`Surface::end_frame`] rasterizes
/// that batch and composites it (source-over) onto the retained premultiplied frame, so the
/// surface keeps its contents between frames like a browser canvas.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    frame: Vec<u8>,
    pending: bool,
    transform: Affine,
    stack: Vec<Affine>,
    text: TextLayoutEngine,
    font_cache: HashMap<usize, vello_cpu::peniko::FontData>,
    image_cache: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
}

impl CpuSurface {
    pub fn new(size: Size) -> SketchResult<Self> {
        let (width, height) = size.to_u16()?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            frame: vec![0; size.pixel_count() * 4],
            pending: false,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            text: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            image_cache: HashMap::new(),
        })
    }

    /// Commit pending drawing and read back the frame (premultiplied).
    pub fn snapshot(&mut self) -> SketchResult<FrameRGBA> {
        self.end_frame()?;
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.frame.clone(),
            premultiplied: true,
        })
    }

    fn begin(&mut self) -> &mut vello_cpu::RenderContext {
        if !self.pending {
            self.ctx.reset();
            self.pending = true;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        &mut self.ctx
    }

    fn font_data_for(&mut self, font: &crate::render::text::Font) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(font.key())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes().as_ref().clone()),
                    0,
                )
            })
            .clone()
    }

    fn image_paint_for(&mut self, image: &Image) -> SketchResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some((_, paint)) = self.image_cache.get(&key) {
            return Ok(paint.clone());
        }

        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        if self.image_cache.len() >= IMAGE_CACHE_CAPACITY {
            self.image_cache.clear();
        }
        self.image_cache
            .insert(key, (Arc::clone(&image.rgba8_premul), paint.clone()));
        Ok(paint)
    }
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pending", &self.pending)
            .field("transform", &self.transform)
            .field("stack_depth", &self.stack.len())
            .finish()
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
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
        let premul = color.premultiplied();
        if premul[3] == 255 {
            // Opaque: everything recorded so far is covered anyway.
            self.ctx.reset();
            self.pending = false;
        } else if let Err(e) = self.end_frame() {
            tracing::error!(error = %e, "failed to commit before clear");
        }
        over_solid_in_place(&mut self.frame, premul);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let transform = affine_to_cpu(self.transform);
        let ctx = self.begin();
        ctx.set_transform(transform);
        ctx.set_paint(cpu_color(color));
        ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let transform = affine_to_cpu(self.transform);
        let ctx = self.begin();
        ctx.set_transform(transform);
        ctx.set_paint(cpu_color(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle<'_>,
    ) -> SketchResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self
            .text
            .layout_line(text, style.font, style.size as f32, style.color)?;

        let width = f64::from(layout.width());
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let first_baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);
        let origin = Affine::translate((baseline.x + dx, baseline.y - first_baseline));

        let font = self.font_data_for(style.font);
        let transform = affine_to_cpu(self.transform * origin);
        let ctx = self.begin();
        ctx.set_transform(transform);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                ctx.set_paint(cpu_color(run.style().brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let paint = match self.image_paint_for(image) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "image could not be converted for drawing");
                return;
            }
        };
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let placement = Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        let transform = affine_to_cpu(self.transform * placement);
        let ctx = self.begin();
        ctx.set_transform(transform);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    }

    fn end_frame(&mut self) -> SketchResult<()> {
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut layer);
        self.ctx.reset();
        self.pending = false;
        over_in_place(&mut self.frame, layer.data_as_u8_slice())
    }
}

fn cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SketchResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SketchError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SketchError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SketchError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
