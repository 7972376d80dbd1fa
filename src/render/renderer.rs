use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::{Affine, FrameIndex, Viewport},
        error::{ScrollreelError, ScrollreelResult},
    },
    frames::store::{FrameState, FrameStore},
    render::{cover::CoverFit, surface::Surface},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Handling of frame indices outside the sequence.
pub enum IndexPolicy {
    /// Fail with [`ScrollreelError::IndexOutOfRange`].
    Strict,
    /// Clamp into range and log.
    Clamp,
}

impl Default for IndexPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Clamp
        }
    }
}

impl IndexPolicy {
    pub(crate) fn resolve(self, index: FrameIndex, frame_count: u32) -> ScrollreelResult<FrameIndex> {
        if index.in_range(frame_count) {
            return Ok(index);
        }
        match self {
            Self::Strict => Err(ScrollreelError::index_out_of_range(index.0, frame_count)),
            Self::Clamp => {
                let clamped = index.clamp_to(frame_count);
                tracing::warn!(%index, %clamped, "frame index out of range, clamping");
                Ok(clamped)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a single `render` call did.
pub enum RenderOutcome {
    /// The surface was cleared and a frame drawn. `drawn` differs from `requested` when a failed
    /// frame was substituted by its nearest loaded neighbour.
    Drawn {
        requested: FrameIndex,
        drawn: FrameIndex,
    },
    /// Frame not available yet; the surface was left untouched.
    NotLoaded(FrameIndex),
    /// No drawing target exists.
    NoSurface,
    /// The surface has zero area.
    EmptySurface,
}

impl RenderOutcome {
    pub fn is_drawn(self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

#[derive(Clone, Debug, Default)]
/// Renderer options.
pub struct RendererOpts {
    /// Straight-alpha colour painted under every frame; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
    pub index_policy: IndexPolicy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Calls that cleared and painted the surface.
    pub draws: u64,
    /// Calls that left the surface untouched.
    pub skipped: u64,
}

#[derive(Clone)]
struct FramePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// Draws one cover-fitted frame at a time onto the owned [`Surface`].
pub struct Renderer {
    surface: Option<Surface>,
    opts: RendererOpts,
    ctx: Option<vello_cpu::RenderContext>,
    paints: Vec<Option<FramePaint>>,
    stats: RenderStats,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("surface", &self.surface)
            .field("opts", &self.opts)
            .field("cached_paints", &self.paints.iter().flatten().count())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Renderer {
    /// Renderer drawing into `surface`; `None` models a page without a canvas.
    pub fn new(surface: Option<Surface>, opts: RendererOpts) -> Self {
        Self {
            surface,
            opts,
            ctx: None,
            paints: Vec::new(),
            stats: RenderStats::default(),
        }
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Clear the surface and draw frame `index` cover-fitted.
    ///
    /// A frame that has not loaded yet is a no-op: the previous pixels stay on the surface.
    pub fn render(
        &mut self,
        store: &FrameStore,
        index: FrameIndex,
    ) -> ScrollreelResult<RenderOutcome> {
        let index = self.opts.index_policy.resolve(index, store.len())?;
        let outcome = self.render_resolved(store, index)?;
        if outcome.is_drawn() {
            self.stats.draws += 1;
        } else {
            self.stats.skipped += 1;
        }
        tracing::trace!(?outcome, "render");
        Ok(outcome)
    }

    /// Resize the surface to `viewport` and immediately redraw `current`.
    pub fn resize(
        &mut self,
        store: &FrameStore,
        viewport: Viewport,
        current: FrameIndex,
    ) -> ScrollreelResult<RenderOutcome> {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("resize without a surface ignored");
            return Ok(RenderOutcome::NoSurface);
        };
        if surface.set_size(viewport)? {
            tracing::debug!(width = viewport.width, height = viewport.height, "surface resized");
        }
        self.render(store, current)
    }

    fn render_resolved(
        &mut self,
        store: &FrameStore,
        index: FrameIndex,
    ) -> ScrollreelResult<RenderOutcome> {
        let Some(viewport) = self.surface.as_ref().map(Surface::viewport) else {
            return Ok(RenderOutcome::NoSurface);
        };
        if viewport.is_empty() {
            return Ok(RenderOutcome::EmptySurface);
        }

        let frame = store.get(index)?;
        let drawn = match frame.state() {
            FrameState::Loaded(_) => index,
            FrameState::Failed(_) => match store.nearest_loaded(index) {
                Some(sub) => sub,
                None => return Ok(RenderOutcome::NotLoaded(index)),
            },
            FrameState::Pending => return Ok(RenderOutcome::NotLoaded(index)),
        };
        let Some(image) = store.get(drawn)?.image() else {
            return Ok(RenderOutcome::NotLoaded(index));
        };

        let paint = self.paint_for(drawn, image, store.len())?;
        let Some(fit) = CoverFit::compute(paint.w, paint.h, viewport) else {
            return Ok(RenderOutcome::NotLoaded(index));
        };
        self.draw(viewport, &paint, fit)?;

        Ok(RenderOutcome::Drawn {
            requested: index,
            drawn,
        })
    }

    fn paint_for(
        &mut self,
        index: FrameIndex,
        image: &PreparedImage,
        frame_count: u32,
    ) -> ScrollreelResult<FramePaint> {
        if self.paints.len() != frame_count as usize {
            self.paints.resize_with(frame_count as usize, || None);
        }
        if let Some(p) = self.paints[index.as_usize()].clone() {
            return Ok(p);
        }
        let pixmap = frame_pixmap(image)?;
        let out = FramePaint {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: image.width,
            h: image.height,
        };
        self.paints[index.as_usize()] = Some(out.clone());
        Ok(out)
    }

    fn draw(&mut self, viewport: Viewport, paint: &FramePaint, fit: CoverFit) -> ScrollreelResult<()> {
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| ScrollreelError::validation("surface width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| ScrollreelError::validation("surface height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some([r, g, b, a]) = self.opts.clear_rgba
            && a > 0
        {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(viewport.width),
                f64::from(viewport.height),
            ));
        }

        ctx.set_transform(affine_to_cpu(fit.to_affine()));
        ctx.set_paint(paint.paint.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(paint.w),
            f64::from(paint.h),
        ));
        ctx.flush();

        if let Some(surface) = self.surface.as_mut() {
            surface.clear(None);
            if let Some(pixmap) = surface.pixmap_mut() {
                ctx.render_to_pixmap(pixmap);
            }
        }
        self.ctx = Some(ctx);
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Frame bitmap as a vello pixmap. Opaque frames (the common JPEG case) skip alpha handling.
fn frame_pixmap(image: &PreparedImage) -> ScrollreelResult<vello_cpu::Pixmap> {
    let Some((w, h)) = Surface::pixmap_size(Viewport::new(image.width, image.height))? else {
        return Err(ScrollreelError::validation("frame image has zero area"));
    };
    let expected = (image.width as usize) * (image.height as usize) * 4;
    if image.rgba8_premul.len() != expected {
        return Err(ScrollreelError::validation(format!(
            "frame image holds {} bytes, expected {expected}",
            image.rgba8_premul.len()
        )));
    }

    let mut opaque = true;
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = image
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            opaque &= px[3] == 255;
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, !opaque))
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
