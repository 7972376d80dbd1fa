use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::Viewport,
    error::{ScrollreelError, ScrollreelResult},
    math::unpremultiply_rgba8_in_place,
};

/// CPU drawing target sized to the host viewport.
///
/// Pixels are premultiplied RGBA8, row-major. A zero-area surface keeps its nominal size but
/// owns no pixel storage.
pub struct Surface {
    viewport: Viewport,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("allocated", &self.pixmap.is_some())
            .finish()
    }
}

impl Surface {
    /// Allocate a transparent surface of `viewport` size.
    pub fn new(viewport: Viewport) -> ScrollreelResult<Self> {
        Ok(Self {
            viewport,
            pixmap: alloc_pixmap(viewport)?,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Pixmap dimensions for `viewport`: `None` for zero area, an error past the u16 limit.
    pub(crate) fn pixmap_size(viewport: Viewport) -> ScrollreelResult<Option<(u16, u16)>> {
        if viewport.is_empty() {
            return Ok(None);
        }
        let w: u16 = viewport
            .width
            .try_into()
            .map_err(|_| ScrollreelError::validation("surface width exceeds u16"))?;
        let h: u16 = viewport
            .height
            .try_into()
            .map_err(|_| ScrollreelError::validation("surface height exceeds u16"))?;
        Ok(Some((w, h)))
    }

    /// Resize to `viewport`, dropping the old contents. Returns `false` if the size is unchanged.
    pub(crate) fn set_size(&mut self, viewport: Viewport) -> ScrollreelResult<bool> {
        if viewport == self.viewport {
            return Ok(false);
        }
        self.pixmap = alloc_pixmap(viewport)?;
        self.viewport = viewport;
        Ok(true)
    }

    /// Fill with `rgba` (straight alpha), or transparent when `None`.
    pub(crate) fn clear(&mut self, rgba: Option<[u8; 4]>) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        match rgba {
            None | Some([_, _, _, 0]) => pixmap.data_as_u8_slice_mut().fill(0),
            Some(c) => {
                let premul = premul_rgba8(c);
                for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
                    px.copy_from_slice(&premul);
                }
            }
        }
    }

    pub(crate) fn pixmap_mut(&mut self) -> Option<&mut vello_cpu::Pixmap> {
        self.pixmap.as_mut()
    }

    /// Premultiplied RGBA8 bytes; empty for a zero-area surface.
    pub fn data(&self) -> &[u8] {
        self.pixmap
            .as_ref()
            .map_or(&[][..], |p| p.data_as_u8_slice())
    }

    /// Premultiplied RGBA8 value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        let i = ((y as usize) * (self.viewport.width as usize) + (x as usize)) * 4;
        let px = self.data().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight (non-premultiplied) alpha.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Encode the current contents as PNG.
    pub fn write_png(&self, path: &Path) -> ScrollreelResult<()> {
        if self.viewport.is_empty() {
            return Err(ScrollreelError::validation(
                "cannot encode a zero-area surface",
            ));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_rgba8_straight(),
            self.viewport.width,
            self.viewport.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn alloc_pixmap(viewport: Viewport) -> ScrollreelResult<Option<vello_cpu::Pixmap>> {
    Ok(Surface::pixmap_size(viewport)?.map(|(w, h)| vello_cpu::Pixmap::new(w, h)))
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
