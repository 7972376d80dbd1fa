use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{error::ScrollreelResult, math::premultiply_rgba8_in_place};

#[derive(Clone, Debug)]
/// Decoded frame bitmap in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build an image from already premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Solid opaque image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let px = (width as usize) * (height as usize);
        let mut bytes = Vec::with_capacity(px * 4);
        for _ in 0..px {
            bytes.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self::from_premul(width, height, bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Decode encoded image bytes (JPEG, PNG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ScrollreelResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage::from_premul(width, height, rgba8_premul))
}

/// Read and decode one image file.
pub fn decode_image_file(path: &Path) -> ScrollreelResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read frame bytes from '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
