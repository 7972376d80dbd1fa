use std::path::PathBuf;

use crate::{
    assets::decode::PreparedImage,
    foundation::{core::FrameIndex, error::ScrollreelResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One asynchronous frame fetch.
pub struct FetchRequest {
    pub index: FrameIndex,
    /// Locator relative to the fetcher's asset root.
    pub source: PathBuf,
}

#[derive(Debug)]
/// Completion of a [`FetchRequest`], delivered back to the event-loop thread.
pub struct LoadEvent {
    pub index: FrameIndex,
    pub result: ScrollreelResult<PreparedImage>,
}

impl LoadEvent {
    pub fn loaded(index: FrameIndex, image: PreparedImage) -> Self {
        Self {
            index,
            result: Ok(image),
        }
    }

    pub fn failed(index: FrameIndex, err: crate::ScrollreelError) -> Self {
        Self {
            index,
            result: Err(err),
        }
    }
}

/// Issues frame fetches without waiting for them.
///
/// Implementations start the load and return immediately; each request must eventually produce
/// exactly one [`LoadEvent`] through whatever channel the host drains into
/// [`crate::HeroAnimator::on_frame_loaded`]. Completion order is unspecified.
pub trait FrameFetcher {
    fn fetch(&mut self, request: FetchRequest);
}

impl<F: FrameFetcher + ?Sized> FrameFetcher for &mut F {
    fn fetch(&mut self, request: FetchRequest) {
        (**self).fetch(request);
    }
}
