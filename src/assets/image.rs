use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use anyhow::Context as _;

use crate::foundation::error::{SketchError, SketchResult};

/// Decoded raster image, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Image {
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> SketchResult<Self> {
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(SketchError::image("image byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> SketchResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SketchResult<Image> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Image::from_straight_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Image that may still be decoding in the background.
///
/// Cloning shares the slot, so every clone observes the same ready state. Drawing code polls
/// [`ImageHandle::get`] and skips the blit until it returns `Some`.
#[derive(Clone, Debug, Default)]
pub struct ImageHandle {
    slot: Arc<OnceLock<Result<Image, String>>>,
}

impl ImageHandle {
    /// Read and decode `path` on the rayon pool.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn(move || {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read image '{}'", path.display()))?;
            decode_image(&bytes)
        })
    }

    /// Decode already-loaded bytes on the rayon pool.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::spawn(move || decode_image(&bytes))
    }

    /// A handle that is ready immediately.
    pub fn from_image(image: Image) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(Ok(image));
        Self {
            slot: Arc::new(slot),
        }
    }

    fn spawn(job: impl FnOnce() -> SketchResult<Image> + Send + 'static) -> Self {
        let handle = Self::default();
        let slot = Arc::clone(&handle.slot);
        rayon::spawn(move || {
            let res = job().map_err(|e| {
                tracing::warn!(error = %e, "image load failed");
                e.to_string()
            });
            let _ = slot.set(res);
        });
        handle
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.slot.get(), Some(Ok(_)))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.slot.get(), Some(Err(_)))
    }

    /// The decoded image once available.
    pub fn get(&self) -> Option<&Image> {
        self.slot.get().and_then(|r| r.as_ref().ok())
    }

    /// Block until decoding has finished.
    pub fn wait(&self) -> SketchResult<&Image> {
        self.slot
            .wait()
            .as_ref()
            .map_err(|e| SketchError::image(e.clone()))
    }
}

/// Convenience wrapper mirroring `loadImage(path)`.
pub fn load_image(path: impl AsRef<Path>) -> ImageHandle {
    ImageHandle::load(path.as_ref())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
