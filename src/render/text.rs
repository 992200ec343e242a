use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::error::{SketchError, SketchResult},
    paint::color::Color,
};

/// Raw font file bytes (TTF/OTF) shared between canvases and surfaces.
#[derive(Clone)]
pub struct Font {
    bytes: Arc<Vec<u8>>,
}

impl Font {
    pub fn from_bytes(bytes: Vec<u8>) -> SketchResult<Self> {
        if bytes.is_empty() {
            return Err(SketchError::text("font bytes are empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Identity of the shared byte buffer; clones of one `Font` share it.
    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.bytes) as usize
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Builds Parley layouts, registering each distinct [`Font`] once.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Color>,
    families: HashMap<usize, (Font, String)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &Font) -> SketchResult<String> {
        if let Some((_, name)) = self.families.get(&font.key()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes().as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SketchError::text("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SketchError::text("registered font family has no name"))?
            .to_string();

        self.families
            .insert(font.key(), (font.clone(), name.clone()));
        Ok(name)
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &Font,
        size_px: f32,
        color: Color,
    ) -> SketchResult<parley::Layout<Color>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SketchError::validation(
                "text size must be finite and > 0",
            ));
        }
        let family = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Color> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
