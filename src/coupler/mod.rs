pub(crate) mod progress;
pub(crate) mod style;
