use crate::{
    foundation::{
        core::FrameIndex,
        error::{ScrollreelError, ScrollreelResult},
    },
    frames::store::FrameStore,
    load::{
        barrier::{LoadBarrier, Settle},
        fetch::{FetchRequest, FrameFetcher, LoadEvent},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What a permanently failed frame does to the ready barrier.
pub enum FailurePolicy {
    /// Count the failure as settled; draws of that frame use the nearest loaded frame.
    #[default]
    SettleAndSubstitute,
    /// Only successes count. One bad asset keeps the animation from ever starting.
    Stall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of applying one [`LoadEvent`].
pub enum Completion {
    /// Recorded; still waiting on other frames.
    Pending { settled: u32, expected: u32 },
    /// All expected frames have settled. Reported exactly once.
    Ready,
    /// Duplicate, unrequested, or post-ready completion; nothing changed.
    Ignored,
}

/// Fans out frame fetches and folds their completions into a [`LoadBarrier`].
#[derive(Debug)]
pub struct Preloader {
    policy: FailurePolicy,
    barrier: Option<LoadBarrier>,
    requested: Vec<bool>,
}

impl Preloader {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            barrier: None,
            requested: Vec::new(),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Whether fetches have been issued.
    pub fn is_started(&self) -> bool {
        self.barrier.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.barrier.as_ref().is_some_and(LoadBarrier::is_ready)
    }

    /// `(settled, expected)` counts, `(0, 0)` before any fetch was issued.
    pub fn progress(&self) -> (u32, u32) {
        self.barrier
            .as_ref()
            .map_or((0, 0), |b| (b.settled(), b.expected()))
    }

    /// Issue a fetch for every frame in `store`. Returns the number of requests issued.
    pub fn load_all(
        &mut self,
        store: &FrameStore,
        fetcher: &mut dyn FrameFetcher,
    ) -> ScrollreelResult<u32> {
        let all: Vec<FrameIndex> = (0..store.len()).map(FrameIndex).collect();
        self.issue(store, &all, fetcher)
    }

    /// Issue a fetch for a single frame; the barrier then waits on that frame alone.
    pub fn load_one(
        &mut self,
        store: &FrameStore,
        index: FrameIndex,
        fetcher: &mut dyn FrameFetcher,
    ) -> ScrollreelResult<u32> {
        self.issue(store, &[index], fetcher)
    }

    fn issue(
        &mut self,
        store: &FrameStore,
        indices: &[FrameIndex],
        fetcher: &mut dyn FrameFetcher,
    ) -> ScrollreelResult<u32> {
        if self.is_started() {
            return Err(ScrollreelError::evaluation("preloader already started"));
        }
        if indices.is_empty() {
            return Err(ScrollreelError::evaluation("nothing to preload"));
        }

        let mut requested = vec![false; store.len() as usize];
        for &index in indices {
            store.get(index)?;
            requested[index.as_usize()] = true;
        }
        let expected = requested.iter().filter(|r| **r).count() as u32;
        self.requested = requested;
        self.barrier = Some(LoadBarrier::new(store.len(), expected));

        tracing::debug!(expected, "issuing frame fetches");
        for (i, _) in self.requested.iter().enumerate().filter(|(_, r)| **r) {
            let index = FrameIndex(i as u32);
            fetcher.fetch(FetchRequest {
                index,
                source: store.source(index)?.to_path_buf(),
            });
        }
        Ok(expected)
    }

    /// Apply one completion to the store and barrier.
    pub fn complete(
        &mut self,
        store: &mut FrameStore,
        event: LoadEvent,
    ) -> ScrollreelResult<Completion> {
        let LoadEvent { index, result } = event;
        store.get(index)?;

        let Some(barrier) = self.barrier.as_mut() else {
            tracing::warn!(%index, "completion received before any fetch was issued");
            return Ok(Completion::Ignored);
        };
        if !self.requested[index.as_usize()] {
            tracing::warn!(%index, "completion for a frame that was never requested");
            return Ok(Completion::Ignored);
        }

        let counts = match result {
            Ok(image) => {
                if !store.mark_loaded(index, image)? {
                    return Ok(Completion::Ignored);
                }
                true
            }
            Err(err) => {
                tracing::warn!(%index, error = %err, "frame failed to load");
                if !store.mark_failed(index, err.to_string())? {
                    return Ok(Completion::Ignored);
                }
                self.policy == FailurePolicy::SettleAndSubstitute
            }
        };

        if !counts {
            return Ok(Completion::Pending {
                settled: barrier.settled(),
                expected: barrier.expected(),
            });
        }

        Ok(match barrier.record(index)? {
            Settle::Counted { settled, expected } => Completion::Pending { settled, expected },
            Settle::Ready => Completion::Ready,
            Settle::Ignored => Completion::Ignored,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/load/preloader.rs"]
mod tests;
