//! Adapters that connect a [`HeroAnimator`](crate::HeroAnimator) to a concrete environment.

pub mod fs_fetcher;
pub mod headless;
pub mod scroll;
