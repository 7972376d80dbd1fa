use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Zero-based position of a frame in the sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Index of the last frame of a sequence of `frame_count` frames.
    pub fn last(frame_count: u32) -> Self {
        Self(frame_count.saturating_sub(1))
    }

    /// Index usable for slice access.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Whether this index addresses a frame in a sequence of `frame_count` frames.
    pub fn in_range(self, frame_count: u32) -> bool {
        self.0 < frame_count
    }

    /// Clamp into `[0, frame_count - 1]`.
    pub fn clamp_to(self, frame_count: u32) -> Self {
        Self(self.0.min(frame_count.saturating_sub(1)))
    }

    /// Fail with [`ScrollreelError::IndexOutOfRange`] unless the index is in range.
    pub fn check(self, frame_count: u32) -> ScrollreelResult<Self> {
        if self.in_range(frame_count) {
            Ok(self)
        } else {
            Err(ScrollreelError::index_out_of_range(self.0, frame_count))
        }
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host viewport size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
