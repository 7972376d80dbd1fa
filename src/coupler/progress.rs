use crate::{
    coupler::style::{ContentFade, ContentStyle, HintFade},
    foundation::core::FrameIndex,
};

/// Snap pin progress to a frame: `round(p * (frame_count - 1))`, clamped into the sequence.
///
/// Pure in `progress`, so scrubbing in either direction lands on the same frames. Rounding is
/// half away from zero. Non-finite input maps to the first frame.
pub fn map_to_index(progress: f64, frame_count: u32) -> FrameIndex {
    if frame_count <= 1 || !progress.is_finite() {
        return FrameIndex(0);
    }
    let last = frame_count - 1;
    let raw = (progress.clamp(0.0, 1.0) * f64::from(last)).round();
    FrameIndex((raw as u32).min(last))
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Everything one progress sample changes.
pub struct CouplerUpdate {
    /// Clamped progress the update was computed from.
    pub progress: f64,
    pub index: FrameIndex,
    /// `false` when the sample snapped to the frame already on screen.
    pub index_changed: bool,
    pub content: ContentStyle,
    pub hint_opacity: f64,
}

/// Converts scroll-linked progress into frame indices and cosmetic styles.
#[derive(Clone, Debug)]
pub struct ScrollCoupler {
    frame_count: u32,
    pin_distance_px: f64,
    content: ContentFade,
    hint: HintFade,
    last_index: FrameIndex,
}

impl ScrollCoupler {
    /// Coupler whose first sample is compared against `initial` (the frame already painted).
    pub fn new(
        frame_count: u32,
        pin_distance_px: f64,
        content: ContentFade,
        hint: HintFade,
        initial: FrameIndex,
    ) -> Self {
        Self {
            frame_count,
            pin_distance_px,
            content,
            hint,
            last_index: initial.clamp_to(frame_count),
        }
    }

    pub fn last_index(&self) -> FrameIndex {
        self.last_index
    }

    /// Apply one progress sample. Non-finite samples are dropped.
    pub fn on_progress(&mut self, progress: f64) -> Option<CouplerUpdate> {
        if !progress.is_finite() {
            tracing::warn!(progress, "ignoring non-finite scroll progress");
            return None;
        }
        let progress = progress.clamp(0.0, 1.0);
        let index = map_to_index(progress, self.frame_count);
        let index_changed = index != self.last_index;
        self.last_index = index;

        Some(CouplerUpdate {
            progress,
            index,
            index_changed,
            content: self.content.style_at(progress, self.pin_distance_px),
            hint_opacity: self.hint.opacity_at(progress, self.pin_distance_px),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coupler/progress.rs"]
mod tests;
