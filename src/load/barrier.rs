use crate::foundation::{core::FrameIndex, error::ScrollreelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Barrier phase. Moves from `Loading` to `Ready` once and never back.
pub enum BarrierState {
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of recording one completion.
pub enum Settle {
    /// Counted; the barrier is still waiting.
    Counted { settled: u32, expected: u32 },
    /// This completion was the last one: the ready signal fires now.
    Ready,
    /// The index was already counted, or the barrier already fired.
    Ignored,
}

/// Counting barrier over a fixed set of frame loads.
///
/// Counts distinct indices only, so duplicate completions can neither fire the barrier early
/// nor fire it twice.
#[derive(Clone, Debug)]
pub struct LoadBarrier {
    expected: u32,
    settled: u32,
    seen: Vec<bool>,
    state: BarrierState,
}

impl LoadBarrier {
    /// Barrier over a sequence of `frame_count` frames waiting for `expected` completions.
    pub fn new(frame_count: u32, expected: u32) -> Self {
        let expected = expected.min(frame_count);
        Self {
            expected,
            settled: 0,
            seen: vec![false; frame_count as usize],
            state: BarrierState::Loading,
        }
    }

    pub fn expected(&self) -> u32 {
        self.expected
    }

    pub fn settled(&self) -> u32 {
        self.settled
    }

    pub fn state(&self) -> BarrierState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == BarrierState::Ready
    }

    /// Record a completion for `index`.
    pub fn record(&mut self, index: FrameIndex) -> ScrollreelResult<Settle> {
        index.check(self.seen.len() as u32)?;
        if self.is_ready() || self.seen[index.as_usize()] {
            return Ok(Settle::Ignored);
        }
        self.seen[index.as_usize()] = true;
        self.settled += 1;

        if self.settled >= self.expected {
            self.state = BarrierState::Ready;
            return Ok(Settle::Ready);
        }
        Ok(Settle::Counted {
            settled: self.settled,
            expected: self.expected,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/load/barrier.rs"]
mod tests;
