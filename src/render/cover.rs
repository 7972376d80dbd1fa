use crate::foundation::core::{Affine, Rect, Vec2, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Aspect-preserving placement that fills the whole surface, cropping the overflowing axis.
pub struct CoverFit {
    /// Uniform scale `max(W / w, H / h)`.
    pub scale: f64,
    /// Top-left of the drawn image in surface space; non-positive on both axes.
    pub offset: Vec2,
    /// Drawn image size `(w * scale, h * scale)`.
    pub size: Vec2,
}

impl CoverFit {
    /// Placement for a `image_w x image_h` bitmap on `surface`. `None` if either is empty.
    pub fn compute(image_w: u32, image_h: u32, surface: Viewport) -> Option<Self> {
        if image_w == 0 || image_h == 0 || surface.is_empty() {
            return None;
        }
        let (iw, ih) = (f64::from(image_w), f64::from(image_h));
        let (sw, sh) = (f64::from(surface.width), f64::from(surface.height));

        let scale = (sw / iw).max(sh / ih);
        let size = Vec2::new(iw * scale, ih * scale);
        let offset = Vec2::new((sw - size.x) / 2.0, (sh - size.y) / 2.0);
        Some(Self {
            scale,
            offset,
            size,
        })
    }

    /// Destination rectangle in surface space.
    pub fn dest_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + self.size.x,
            self.offset.y + self.size.y,
        )
    }

    /// Image-space to surface-space transform.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Whether the drawn rectangle covers `[0, W] x [0, H]`, with `eps` slack for rounding.
    pub fn covers(&self, surface: Viewport, eps: f64) -> bool {
        let r = self.dest_rect();
        let s = surface.as_rect();
        r.x0 <= s.x0 + eps && r.y0 <= s.y0 + eps && r.x1 >= s.x1 - eps && r.y1 >= s.y1 - eps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cover.rs"]
mod tests;
