use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    coupler::style::{ContentFade, HintFade},
    foundation::error::{ScrollreelError, ScrollreelResult},
    frames::locator::{DEFAULT_FRAME_COUNT, FrameLocator},
    load::preloader::FailurePolicy,
    render::renderer::{IndexPolicy, RendererOpts},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Pinned scroll region driving the frame sequence.
pub struct PinConfig {
    /// Scroll distance over which progress runs from 0 to 1.
    pub scroll_distance_px: f64,
    /// Smoothing time constant applied by the scroll timeline; 0 disables smoothing.
    pub scrub_secs: f64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            scroll_distance_px: 3000.0,
            scrub_secs: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Animator configuration. Every field has a default, so `{}` is a valid config.
pub struct AnimatorConfig {
    pub frame_count: u32,
    pub locator: FrameLocator,
    pub pin: PinConfig,
    pub content_fade: ContentFade,
    pub hint_fade: HintFade,
    pub failure_policy: FailurePolicy,
    pub index_policy: IndexPolicy,
    /// Straight-alpha colour under each frame.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            locator: FrameLocator::default(),
            pin: PinConfig::default(),
            content_fade: ContentFade::default(),
            hint_fade: HintFade::default(),
            failure_policy: FailurePolicy::default(),
            index_policy: IndexPolicy::default(),
            clear_rgba: None,
        }
    }
}

impl AnimatorConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> ScrollreelResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ScrollreelError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(s: &str) -> ScrollreelResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ScrollreelError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ScrollreelResult<()> {
        if self.frame_count == 0 {
            return Err(ScrollreelError::validation("frame_count must be >= 1"));
        }
        self.locator.validate()?;
        if !self.pin.scroll_distance_px.is_finite() || self.pin.scroll_distance_px <= 0.0 {
            return Err(ScrollreelError::validation(
                "pin.scroll_distance_px must be finite and > 0",
            ));
        }
        if !self.pin.scrub_secs.is_finite() || self.pin.scrub_secs < 0.0 {
            return Err(ScrollreelError::validation(
                "pin.scrub_secs must be finite and >= 0",
            ));
        }
        self.content_fade.track().validate("content_fade")?;
        self.hint_fade.track().validate("hint_fade")?;
        Ok(())
    }

    pub fn renderer_opts(&self) -> RendererOpts {
        RendererOpts {
            clear_rgba: self.clear_rgba,
            index_policy: self.index_policy,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
