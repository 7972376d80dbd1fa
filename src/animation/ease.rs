/// Easing curves for the scroll-scrubbed style tracks, named after the power family used by
/// scroll-linking libraries: `powerN` raises `t` to `N + 1`.
///
/// A tween with no explicit ease runs `power1.out`, hence the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[serde(rename = "none", alias = "linear")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
}

impl Ease {
    fn exponent(self) -> i32 {
        match self {
            Self::Linear => 1,
            Self::Power1In | Self::Power1Out => 2,
            Self::Power2In | Self::Power2Out => 3,
        }
    }

    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1In | Self::Power2In => t.powi(self.exponent()),
            Self::Power1Out | Self::Power2Out => 1.0 - (1.0 - t).powi(self.exponent()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
