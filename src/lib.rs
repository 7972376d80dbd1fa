//! Scrollreel plays a pre-rendered image sequence in step with page scroll.
//!
//! A [`HeroAnimator`] owns everything for one hero section:
//!
//! - Preload the frame sequence through a [`FrameFetcher`] and wait for every frame to settle
//! - Paint frames cover-fitted onto a CPU [`Surface`]
//! - Map pinned scroll progress to frames and to the hero copy fade
//!
//! Users who prefer reduced motion get the final frame only. The [`host`] module provides a
//! disk-backed fetcher and a headless event loop.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod animator;
pub(crate) mod config;
pub(crate) mod coupler;
pub(crate) mod frames;
pub(crate) mod gate;
pub mod host;
pub(crate) mod load;
pub(crate) mod render;

pub use crate::foundation::core::{Affine, FrameIndex, Rect, Vec2, Viewport};
pub use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use crate::animation::ease::Ease;
pub use crate::animator::{AnimatorState, HeroAnimator, HostEvent, Presentation};
pub use crate::assets::decode::{PreparedImage, decode_image, decode_image_file};
pub use crate::config::{AnimatorConfig, PinConfig};
pub use crate::coupler::progress::{CouplerUpdate, ScrollCoupler, map_to_index};
pub use crate::coupler::style::{ContentFade, ContentStyle, HintFade, StyleTrack};
pub use crate::frames::locator::{
    DEFAULT_BASE_DIR, DEFAULT_FRAME_COUNT, DEFAULT_STEM, FrameLocator,
};
pub use crate::frames::store::{Frame, FrameState, FrameStore};
pub use crate::gate::motion::{
    EnvMotionPreference, MotionMode, MotionPreference, REDUCED_MOTION_ENV,
};
pub use crate::load::barrier::{BarrierState, LoadBarrier, Settle};
pub use crate::load::fetch::{FetchRequest, FrameFetcher, LoadEvent};
pub use crate::load::preloader::{Completion, FailurePolicy, Preloader};
pub use crate::render::cover::CoverFit;
pub use crate::render::renderer::{IndexPolicy, RenderOutcome, RenderStats, Renderer, RendererOpts};
pub use crate::render::surface::Surface;
