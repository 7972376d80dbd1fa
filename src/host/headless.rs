use std::{
    path::PathBuf,
    sync::mpsc,
    time::{Duration, Instant},
};

use crate::{
    animator::{AnimatorState, HeroAnimator},
    config::AnimatorConfig,
    foundation::{
        core::Viewport,
        error::{ScrollreelError, ScrollreelResult},
    },
    gate::motion::{MotionMode, MotionPreference},
    host::{
        fs_fetcher::FsFetcher,
        scroll::{PinnedScrollTimeline, ScrollLinkedProgress as _},
    },
    load::fetch::LoadEvent,
    render::renderer::RenderOutcome,
};

#[derive(Clone, Debug)]
/// Options for [`HeadlessHost`].
pub struct HeadlessOpts {
    /// Directory relative frame sources resolve against.
    pub root: PathBuf,
    pub viewport: Viewport,
    /// Page scroll offset where the pin begins.
    pub pin_start_px: f64,
    /// Fetch worker count; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// Event loop without a browser: disk fetches, a simulated scroll timeline, and a CPU surface.
///
/// Progress reaches the animator at most once per [`step`](Self::step), which is the headless
/// equivalent of coalescing scroll events to one per display frame.
pub struct HeadlessHost {
    animator: HeroAnimator,
    fetcher: FsFetcher,
    events: mpsc::Receiver<LoadEvent>,
    timeline: PinnedScrollTimeline,
}

impl HeadlessHost {
    pub fn new(config: AnimatorConfig, opts: HeadlessOpts) -> ScrollreelResult<Self> {
        let timeline = PinnedScrollTimeline::new(opts.pin_start_px, config.pin);
        let animator = HeroAnimator::new(config, opts.viewport)?;
        let (fetcher, events) = FsFetcher::new(opts.root, opts.threads)?;
        Ok(Self {
            animator,
            fetcher,
            events,
            timeline,
        })
    }

    pub fn animator(&self) -> &HeroAnimator {
        &self.animator
    }

    pub fn timeline(&self) -> &PinnedScrollTimeline {
        &self.timeline
    }

    pub fn start(&mut self, pref: &dyn MotionPreference) -> ScrollreelResult<MotionMode> {
        self.animator.start(pref, &mut self.fetcher)
    }

    /// Deliver load completions until the animator is ready or `timeout` passes.
    #[tracing::instrument(skip(self))]
    pub fn wait_until_ready(&mut self, timeout: Duration) -> ScrollreelResult<()> {
        let deadline = Instant::now() + timeout;
        while self.animator.state() == AnimatorState::Loading {
            let left = deadline.saturating_duration_since(Instant::now());
            let event = match self.events.recv_timeout(left) {
                Ok(event) => event,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    let (settled, expected) = self.animator.load_progress();
                    return Err(ScrollreelError::evaluation(format!(
                        "timed out waiting for frames ({settled} of {expected} settled)"
                    )));
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(ScrollreelError::evaluation(
                        "frame fetch channel disconnected unexpectedly",
                    ));
                }
            };
            self.animator.on_frame_loaded(event)?;
        }
        Ok(())
    }

    /// Set the simulated page scroll offset. Takes effect on the next [`step`](Self::step).
    pub fn scroll_to(&mut self, scroll_y_px: f64) {
        self.timeline.set_scroll(scroll_y_px);
    }

    /// Advance one display frame of `dt_secs` and hand the smoothed progress to the animator.
    pub fn step(&mut self, dt_secs: f64) -> ScrollreelResult<Option<RenderOutcome>> {
        self.timeline.tick(dt_secs);
        self.animator.on_progress(self.timeline.progress())
    }

    /// Step until the timeline comes to rest, at most `max_steps` times. Returns the steps taken.
    ///
    /// The resting progress is always delivered, so the surface ends on the frame it maps to.
    pub fn settle(&mut self, dt_secs: f64, max_steps: usize) -> ScrollreelResult<usize> {
        for n in 1..=max_steps {
            self.step(dt_secs)?;
            if self.timeline.is_settled() {
                return Ok(n);
            }
        }
        Ok(max_steps)
    }

    pub fn resize(&mut self, viewport: Viewport) -> ScrollreelResult<Option<RenderOutcome>> {
        self.animator.on_resize(viewport)
    }
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("animator", &self.animator)
            .field("fetcher", &self.fetcher)
            .field("timeline", &self.timeline)
            .finish()
    }
}
