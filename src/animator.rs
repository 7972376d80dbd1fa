use crate::{
    config::AnimatorConfig,
    coupler::{progress::ScrollCoupler, style::ContentStyle},
    foundation::{
        core::{FrameIndex, Viewport},
        error::{ScrollreelError, ScrollreelResult},
    },
    frames::store::FrameStore,
    gate::motion::{MotionMode, MotionPreference},
    load::{
        fetch::{FrameFetcher, LoadEvent},
        preloader::{Completion, Preloader},
    },
    render::{
        renderer::{RenderOutcome, RenderStats, Renderer},
        surface::Surface,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle of a [`HeroAnimator`]. `Ready` is terminal.
pub enum AnimatorState {
    Idle,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Page-level presentation state derived from loading and scroll progress.
pub struct Presentation {
    /// Loading overlay; hidden once the frames are ready.
    pub loader_visible: bool,
    pub content: ContentStyle,
    pub hint_opacity: f64,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            loader_visible: true,
            content: ContentStyle::default(),
            hint_opacity: 1.0,
        }
    }
}

#[derive(Debug)]
/// Input delivered by the host event loop.
pub enum HostEvent {
    FrameLoaded(LoadEvent),
    Resize(Viewport),
    Progress(f64),
}

/// Owns the whole scroll-driven frame animation for one hero section.
///
/// All state lives here, so independent instances never interfere. Every method runs on the
/// thread that owns the animator; asynchronous work only ever reaches it as [`HostEvent`]s.
pub struct HeroAnimator {
    config: AnimatorConfig,
    store: FrameStore,
    preloader: Preloader,
    renderer: Renderer,
    coupler: Option<ScrollCoupler>,
    mode: Option<MotionMode>,
    state: AnimatorState,
    current_index: FrameIndex,
    viewport: Viewport,
    resize_attached: bool,
    /// Latest progress seen before scroll coupling was attached.
    pending_progress: Option<f64>,
    presentation: Presentation,
}

impl std::fmt::Debug for HeroAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroAnimator")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("current_index", &self.current_index)
            .field("viewport", &self.viewport)
            .field("load_progress", &self.preloader.progress())
            .field("scroll_coupled", &self.coupler.is_some())
            .finish()
    }
}

impl HeroAnimator {
    /// Animator drawing into a surface sized to `viewport`.
    pub fn new(config: AnimatorConfig, viewport: Viewport) -> ScrollreelResult<Self> {
        let surface = Surface::new(viewport)?;
        Self::build(config, viewport, Some(surface))
    }

    /// Animator for a page without a drawing target. It never loads or draws anything.
    pub fn without_surface(config: AnimatorConfig, viewport: Viewport) -> ScrollreelResult<Self> {
        Self::build(config, viewport, None)
    }

    fn build(
        config: AnimatorConfig,
        viewport: Viewport,
        surface: Option<Surface>,
    ) -> ScrollreelResult<Self> {
        config.validate()?;
        let store = FrameStore::new(&config.locator, config.frame_count)?;
        let preloader = Preloader::new(config.failure_policy);
        let renderer = Renderer::new(surface, config.renderer_opts());
        Ok(Self {
            config,
            store,
            preloader,
            renderer,
            coupler: None,
            mode: None,
            state: AnimatorState::Idle,
            current_index: FrameIndex(0),
            viewport,
            resize_attached: false,
            pending_progress: None,
            presentation: Presentation::default(),
        })
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Mode chosen at [`start`](Self::start); `None` before that.
    pub fn mode(&self) -> Option<MotionMode> {
        self.mode
    }

    pub fn current_index(&self) -> FrameIndex {
        self.current_index
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.renderer.surface()
    }

    pub fn render_stats(&self) -> RenderStats {
        self.renderer.stats()
    }

    /// `(settled, expected)` frame loads.
    pub fn load_progress(&self) -> (u32, u32) {
        self.preloader.progress()
    }

    /// Whether scroll progress drives frames.
    pub fn is_scroll_coupled(&self) -> bool {
        self.coupler.is_some()
    }

    /// Whether viewport resizes repaint the surface.
    pub fn is_resize_attached(&self) -> bool {
        self.resize_attached
    }

    /// Read the motion preference once and issue the fetches for the chosen mode.
    #[tracing::instrument(skip(self, pref, fetcher))]
    pub fn start(
        &mut self,
        pref: &dyn MotionPreference,
        fetcher: &mut dyn FrameFetcher,
    ) -> ScrollreelResult<MotionMode> {
        if self.mode.is_some() {
            return Err(ScrollreelError::evaluation("animator already started"));
        }
        let mode = MotionMode::from_preference(pref);
        self.mode = Some(mode);

        if !self.renderer.has_surface() {
            tracing::debug!(?mode, "no drawing surface; hero animation disabled");
            return Ok(mode);
        }

        let issued = match mode {
            MotionMode::Full => self.preloader.load_all(&self.store, fetcher)?,
            MotionMode::Reduced => {
                self.current_index = self.store.last_index();
                self.preloader
                    .load_one(&self.store, self.current_index, fetcher)?
            }
        };
        self.state = AnimatorState::Loading;
        tracing::info!(?mode, issued, "preloading hero frames");
        Ok(mode)
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: HostEvent) -> ScrollreelResult<()> {
        match event {
            HostEvent::FrameLoaded(ev) => self.on_frame_loaded(ev).map(|_| ()),
            HostEvent::Resize(vp) => self.on_resize(vp).map(|_| ()),
            HostEvent::Progress(p) => self.on_progress(p).map(|_| ()),
        }
    }

    /// Apply one load completion; on the final one, paint and attach listeners.
    #[tracing::instrument(skip(self, event), fields(index = %event.index))]
    pub fn on_frame_loaded(&mut self, event: LoadEvent) -> ScrollreelResult<Completion> {
        let completion = self.preloader.complete(&mut self.store, event)?;
        if completion == Completion::Ready {
            self.become_ready()?;
        }
        Ok(completion)
    }

    fn become_ready(&mut self) -> ScrollreelResult<()> {
        self.presentation.loader_visible = false;

        let initial = self
            .renderer
            .resize(&self.store, self.viewport, self.current_index)?;
        self.resize_attached = true;

        if self.mode == Some(MotionMode::Full) {
            self.coupler = Some(ScrollCoupler::new(
                self.store.len(),
                self.config.pin.scroll_distance_px,
                self.config.content_fade,
                self.config.hint_fade,
                self.current_index,
            ));
        }
        self.state = AnimatorState::Ready;

        // Scroll may have moved while frames were loading; catch up to where it rests.
        if let Some(progress) = self.pending_progress.take() {
            self.apply_progress(progress)?;
        }

        tracing::info!(
            loaded = self.store.loaded_count(),
            failed = self.store.failed_count(),
            index = %self.current_index,
            ?initial,
            "hero frames ready"
        );
        Ok(())
    }

    /// Record the new viewport size; repaints once resize handling is attached.
    ///
    /// A viewport the surface cannot take is rejected and the previous one kept.
    pub fn on_resize(&mut self, viewport: Viewport) -> ScrollreelResult<Option<RenderOutcome>> {
        if !self.resize_attached {
            Surface::pixmap_size(viewport)?;
            self.viewport = viewport;
            return Ok(None);
        }
        let outcome = self
            .renderer
            .resize(&self.store, viewport, self.current_index)?;
        self.viewport = viewport;
        Ok(Some(outcome))
    }

    /// Apply a scroll progress sample.
    ///
    /// Before the frames are ready the latest finite sample is held and applied on the ready
    /// transition in full-motion mode. Reduced motion never follows scroll.
    ///
    /// Returns the render outcome when the sample moved to a different frame.
    pub fn on_progress(&mut self, progress: f64) -> ScrollreelResult<Option<RenderOutcome>> {
        if self.coupler.is_none() {
            if self.state != AnimatorState::Ready && progress.is_finite() {
                self.pending_progress = Some(progress);
            }
            return Ok(None);
        }
        self.apply_progress(progress)
    }

    fn apply_progress(&mut self, progress: f64) -> ScrollreelResult<Option<RenderOutcome>> {
        let Some(coupler) = self.coupler.as_mut() else {
            return Ok(None);
        };
        let Some(update) = coupler.on_progress(progress) else {
            return Ok(None);
        };

        self.presentation.content = update.content;
        self.presentation.hint_opacity = update.hint_opacity;
        if !update.index_changed {
            return Ok(None);
        }

        self.current_index = update.index;
        self.renderer
            .render(&self.store, self.current_index)
            .map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/unit/animator.rs"]
mod tests;
