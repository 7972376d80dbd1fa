use crate::{
    animation::ease::Ease,
    foundation::{
        error::{ScrollreelError, ScrollreelResult},
        math::lerp,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scrubbed sub-range of the pinned region, starting where the pin starts.
pub struct StyleTrack {
    /// Scroll distance after which the track is complete.
    pub end_px: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl StyleTrack {
    pub fn validate(&self, what: &str) -> ScrollreelResult<()> {
        if !self.end_px.is_finite() || self.end_px <= 0.0 {
            return Err(ScrollreelError::validation(format!(
                "{what} end_px must be finite and > 0"
            )));
        }
        Ok(())
    }

    /// Eased local progress of this track given the pin-wide `progress`.
    pub fn sample(&self, progress: f64, pin_distance_px: f64) -> f64 {
        let scrolled = progress.clamp(0.0, 1.0) * pin_distance_px;
        self.ease.apply(scrolled / self.end_px)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Hero copy fades out and drifts upward over the first part of the pin.
pub struct ContentFade {
    pub end_px: f64,
    pub ease: Ease,
    /// Vertical offset reached at the end of the track.
    pub translate_y_px: f64,
}

impl Default for ContentFade {
    fn default() -> Self {
        Self {
            end_px: 1000.0,
            ease: Ease::Power2In,
            translate_y_px: -100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// "Scroll to explore" hint fades out almost immediately.
pub struct HintFade {
    pub end_px: f64,
    pub ease: Ease,
}

impl Default for HintFade {
    fn default() -> Self {
        Self {
            end_px: 200.0,
            ease: Ease::Power1Out,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Style of the hero copy block.
pub struct ContentStyle {
    pub opacity: f64,
    pub translate_y_px: f64,
}

impl Default for ContentStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_y_px: 0.0,
        }
    }
}

impl ContentFade {
    pub fn track(&self) -> StyleTrack {
        StyleTrack {
            end_px: self.end_px,
            ease: self.ease,
        }
    }

    pub fn style_at(&self, progress: f64, pin_distance_px: f64) -> ContentStyle {
        let t = self.track().sample(progress, pin_distance_px);
        ContentStyle {
            opacity: lerp(1.0, 0.0, t),
            translate_y_px: lerp(0.0, self.translate_y_px, t),
        }
    }
}

impl HintFade {
    pub fn track(&self) -> StyleTrack {
        StyleTrack {
            end_px: self.end_px,
            ease: self.ease,
        }
    }

    pub fn opacity_at(&self, progress: f64, pin_distance_px: f64) -> f64 {
        lerp(1.0, 0.0, self.track().sample(progress, pin_distance_px))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coupler/style.rs"]
mod tests;
