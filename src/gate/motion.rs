/// Environment variable consulted by [`EnvMotionPreference`].
pub const REDUCED_MOTION_ENV: &str = "SCROLLREEL_REDUCED_MOTION";

/// Platform accessibility signal: does the user prefer reduced motion?
///
/// Read exactly once, when the animator starts.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

/// Preference read from an environment variable (`1`, `true`, `yes`, `reduce`).
#[derive(Clone, Debug)]
pub struct EnvMotionPreference {
    var: String,
}

impl Default for EnvMotionPreference {
    fn default() -> Self {
        Self::new(REDUCED_MOTION_ENV)
    }
}

impl EnvMotionPreference {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    fn parse(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "reduce"
        )
    }
}

impl MotionPreference for EnvMotionPreference {
    fn prefers_reduced_motion(&self) -> bool {
        std::env::var(&self.var).is_ok_and(|v| Self::parse(&v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Session-wide playback mode chosen at startup.
pub enum MotionMode {
    /// Preload every frame and follow scroll progress.
    Full,
    /// Show the final frame only; scrolling does not animate.
    Reduced,
}

impl MotionMode {
    pub fn from_preference(pref: &dyn MotionPreference) -> Self {
        if pref.prefers_reduced_motion() {
            Self::Reduced
        } else {
            Self::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/motion.rs"]
mod tests;
