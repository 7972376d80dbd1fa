use std::path::{Path, PathBuf};

use crate::foundation::{
    core::FrameIndex,
    error::{ScrollreelError, ScrollreelResult},
};

/// Default directory holding the hero frame sequence.
pub const DEFAULT_BASE_DIR: &str = ".agent/hero/animation-images";
/// Default file stem shared by every frame.
pub const DEFAULT_STEM: &str = "Smooth_ritual_transition_1080p_202601290923";
/// Default number of frames in the sequence.
pub const DEFAULT_FRAME_COUNT: u32 = 80;

/// Path template `<base_dir>/<stem>_<index zero-padded>.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameLocator {
    pub base_dir: PathBuf,
    pub stem: String,
    pub extension: String,
    /// Minimum digit count; wider indices are written in full.
    pub pad_width: usize,
}

impl Default for FrameLocator {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            stem: DEFAULT_STEM.to_string(),
            extension: "jpg".to_string(),
            pad_width: 3,
        }
    }
}

impl FrameLocator {
    pub fn validate(&self) -> ScrollreelResult<()> {
        if self.stem.trim().is_empty() {
            return Err(ScrollreelError::validation("locator stem must be non-empty"));
        }
        if self.pad_width == 0 {
            return Err(ScrollreelError::validation("locator pad_width must be >= 1"));
        }
        if self.extension.is_empty() || self.extension.contains(['/', '\\', '.']) {
            return Err(ScrollreelError::validation(
                "locator extension must be a bare extension like 'jpg'",
            ));
        }
        Ok(())
    }

    /// File name of frame `index`, e.g. `Smooth_..._007.jpg`.
    pub fn file_name(&self, index: FrameIndex) -> String {
        format!(
            "{}_{:0width$}.{}",
            self.stem,
            index.0,
            self.extension,
            width = self.pad_width
        )
    }

    /// Locator of frame `index` relative to the asset root.
    pub fn path_for(&self, index: FrameIndex) -> PathBuf {
        self.base_dir.join(self.file_name(index))
    }

    /// Locator of frame `index` resolved against `root`.
    pub fn resolve(&self, root: &Path, index: FrameIndex) -> PathBuf {
        root.join(self.path_for(index))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/locator.rs"]
mod tests;
