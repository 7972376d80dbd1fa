pub(crate) mod barrier;
pub(crate) mod fetch;
pub(crate) mod preloader;
