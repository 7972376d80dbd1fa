use std::path::{Path, PathBuf};

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::FrameIndex,
        error::{ScrollreelError, ScrollreelResult},
    },
    frames::locator::FrameLocator,
};

#[derive(Clone, Debug, Default)]
/// Load state of one frame slot.
pub enum FrameState {
    /// Not loaded yet (possibly never requested).
    #[default]
    Pending,
    /// Decoded and ready to draw.
    Loaded(PreparedImage),
    /// Fetch or decode failed; the slot stays empty for the session.
    Failed(String),
}

#[derive(Clone, Debug)]
/// One entry of the frame sequence.
pub struct Frame {
    /// Position in the sequence.
    pub index: FrameIndex,
    /// Source locator derived from `index`.
    pub source: PathBuf,
    state: FrameState,
}

impl Frame {
    /// Current load state.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Decoded bitmap, present once loaded.
    pub fn image(&self) -> Option<&PreparedImage> {
        match &self.state {
            FrameState::Loaded(img) => Some(img),
            _ => None,
        }
    }

    /// Whether the bitmap has finished loading.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, FrameState::Loaded(_))
    }

    /// Whether the slot has reached a final state (loaded or failed).
    pub fn is_settled(&self) -> bool {
        !matches!(self.state, FrameState::Pending)
    }
}

#[derive(Clone, Debug)]
/// Fixed-length, write-once store of frame slots.
///
/// `len()` never changes after construction and slot `i` always describes frame `i`.
pub struct FrameStore {
    frames: Vec<Frame>,
}

impl FrameStore {
    /// Allocate `frame_count` pending slots, deriving each locator from `locator`.
    pub fn new(locator: &FrameLocator, frame_count: u32) -> ScrollreelResult<Self> {
        if frame_count == 0 {
            return Err(ScrollreelError::validation("frame_count must be >= 1"));
        }
        locator.validate()?;

        let frames = (0..frame_count)
            .map(|i| {
                let index = FrameIndex(i);
                Frame {
                    index,
                    source: locator.path_for(index),
                    state: FrameState::Pending,
                }
            })
            .collect();
        Ok(Self { frames })
    }

    /// Number of slots (the fixed frame count).
    pub fn len(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the final frame.
    pub fn last_index(&self) -> FrameIndex {
        FrameIndex::last(self.len())
    }

    /// Frame at `index`; fails with [`ScrollreelError::IndexOutOfRange`] outside the sequence.
    pub fn get(&self, index: FrameIndex) -> ScrollreelResult<&Frame> {
        index.check(self.len())?;
        Ok(&self.frames[index.as_usize()])
    }

    /// Source locator of frame `index`.
    pub fn source(&self, index: FrameIndex) -> ScrollreelResult<&Path> {
        self.get(index).map(|f| f.source.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Store a decoded bitmap. Returns `false` if the slot was already settled.
    pub fn mark_loaded(&mut self, index: FrameIndex, image: PreparedImage) -> ScrollreelResult<bool> {
        self.settle(index, FrameState::Loaded(image))
    }

    /// Record a permanent failure. Returns `false` if the slot was already settled.
    pub fn mark_failed(
        &mut self,
        index: FrameIndex,
        reason: impl Into<String>,
    ) -> ScrollreelResult<bool> {
        self.settle(index, FrameState::Failed(reason.into()))
    }

    fn settle(&mut self, index: FrameIndex, state: FrameState) -> ScrollreelResult<bool> {
        index.check(self.len())?;
        let slot = &mut self.frames[index.as_usize()];
        if slot.is_settled() {
            return Ok(false);
        }
        slot.state = state;
        Ok(true)
    }

    pub fn loaded_count(&self) -> u32 {
        self.frames.iter().filter(|f| f.is_loaded()).count() as u32
    }

    pub fn failed_count(&self) -> u32 {
        self.frames
            .iter()
            .filter(|f| matches!(f.state, FrameState::Failed(_)))
            .count() as u32
    }

    /// Closest loaded frame to `index`, preferring the lower index on ties.
    pub fn nearest_loaded(&self, index: FrameIndex) -> Option<FrameIndex> {
        let len = self.frames.len();
        let center = index.as_usize().min(len.checked_sub(1)?);
        for dist in 0..len {
            if let Some(lo) = center.checked_sub(dist)
                && self.frames[lo].is_loaded()
            {
                return Some(FrameIndex(lo as u32));
            }
            let hi = center + dist;
            if hi < len && self.frames[hi].is_loaded() {
                return Some(FrameIndex(hi as u32));
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/store.rs"]
mod tests;
