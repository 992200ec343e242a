use crate::{
    assets::image::{Image, ImageHandle},
    draw::canvas::Canvas,
    foundation::error::{SketchError, SketchResult},
    paint::color::Color,
    render::surface::Surface,
};

/// Off-screen straight-alpha RGBA8 pixel buffer.
///
/// Pixels are edited with [`Bitmap::set`], then copied into a drawable image by
/// [`Bitmap::realize`]; nothing is synchronized implicitly.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
    realized: Option<ImageHandle>,
}

impl Bitmap {
    /// Zero-initialized (transparent) bitmap. Fails when the byte length overflows `usize`.
    pub fn new(width: u32, height: u32) -> SketchResult<Self> {
        Ok(Self {
            width,
            height,
            data: vec![0; byte_len(width, height)?],
            realized: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Color {
        let i = self.offset(x, y);
        let px = &self.data[i..i + 4];
        Color::rgba(px[0], px[1], px[2], px[3])
    }

    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Nearest-neighbor upscale: each pixel becomes a `factor`×`factor` block.
    pub fn scale(&mut self, factor: u32) -> SketchResult<()> {
        if factor == 0 {
            return Err(SketchError::validation("bitmap scale factor must be >= 1"));
        }
        if factor == 1 {
            return Ok(());
        }

        let new_w = self
            .width
            .checked_mul(factor)
            .ok_or_else(|| SketchError::validation("scaled bitmap width overflows"))?;
        let new_h = self
            .height
            .checked_mul(factor)
            .ok_or_else(|| SketchError::validation("scaled bitmap height overflows"))?;

        let total = byte_len(new_w, new_h)?;

        let k = factor as usize;
        let src_row_bytes = self.width as usize * 4;
        let dst_row_bytes = new_w as usize * 4;
        let mut out = vec![0u8; total];

        for (y, src_row) in self.data.chunks_exact(src_row_bytes.max(1)).enumerate() {
            let mut row = Vec::with_capacity(dst_row_bytes);
            for px in src_row.chunks_exact(4) {
                for _ in 0..k {
                    row.extend_from_slice(px);
                }
            }
            for dy in 0..k {
                let start = (y * k + dy) * dst_row_bytes;
                out[start..start + dst_row_bytes].copy_from_slice(&row);
            }
        }

        self.width = new_w;
        self.height = new_h;
        self.data = out;
        Ok(())
    }

    /// Copy the current pixels into the image drawn by [`Bitmap::present`].
    pub fn realize(&mut self) -> SketchResult<()> {
        let image = Image::from_straight_rgba8(self.width, self.height, self.data.clone())?;
        self.realized = Some(ImageHandle::from_image(image));
        Ok(())
    }

    pub fn is_realized(&self) -> bool {
        self.realized.is_some()
    }

    /// Draw the last realized pixels at `(x, y)`, rotated by the ambient rotation about the
    /// bitmap center. Does nothing before the first [`Bitmap::realize`].
    pub fn present<S: Surface>(&self, canvas: &mut Canvas<S>, x: f64, y: f64) {
        match &self.realized {
            Some(handle) => canvas.image(handle, x, y, None, None),
            None => tracing::debug!("bitmap presented before realize; skipped"),
        }
    }
}

fn byte_len(width: u32, height: u32) -> SketchResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(|| {
            SketchError::validation(format!("bitmap {width}x{height} is too large"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
