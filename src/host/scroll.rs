use crate::config::PinConfig;

/// Source of scroll-linked progress in `[0, 1]` across the pinned region.
pub trait ScrollLinkedProgress {
    fn progress(&self) -> f64;
}

/// Pinned scroll region with scrubbed (smoothed) progress.
///
/// The pin starts when the page scroll offset reaches `start_px` and ends
/// `scroll_distance_px` later. Smoothed progress chases the raw target with time constant
/// `scrub_secs` and snaps onto it once close enough, so a resting scroll position always ends
/// on exactly the target.
#[derive(Clone, Debug)]
pub struct PinnedScrollTimeline {
    start_px: f64,
    distance_px: f64,
    scrub_secs: f64,
    target: f64,
    current: f64,
}

const SNAP_EPS: f64 = 1e-4;

impl PinnedScrollTimeline {
    pub fn new(start_px: f64, pin: PinConfig) -> Self {
        Self {
            start_px,
            distance_px: pin.scroll_distance_px,
            scrub_secs: pin.scrub_secs,
            target: 0.0,
            current: 0.0,
        }
    }

    /// Update the raw page scroll offset. Non-finite offsets are ignored.
    pub fn set_scroll(&mut self, scroll_y_px: f64) {
        if !scroll_y_px.is_finite() {
            tracing::warn!(scroll_y_px, "ignoring non-finite scroll offset");
            return;
        }
        self.target = ((scroll_y_px - self.start_px) / self.distance_px).clamp(0.0, 1.0);
        if self.scrub_secs <= 0.0 {
            self.current = self.target;
        }
    }

    /// Advance smoothing by `dt_secs` and return the new progress.
    pub fn tick(&mut self, dt_secs: f64) -> f64 {
        if self.scrub_secs <= 0.0 || !dt_secs.is_finite() || dt_secs <= 0.0 {
            if self.scrub_secs <= 0.0 {
                self.current = self.target;
            }
            return self.current;
        }
        let k = 1.0 - (-dt_secs / self.scrub_secs).exp();
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < SNAP_EPS {
            self.current = self.target;
        }
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

impl ScrollLinkedProgress for PinnedScrollTimeline {
    fn progress(&self) -> f64 {
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scroll.rs"]
mod tests;
