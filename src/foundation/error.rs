/// Convenience result type used across scrollreel.
pub type ScrollreelResult<T> = Result<T, ScrollreelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are fatal to the host page: the animator degrades to a blank or frozen surface
/// and keeps accepting events.
#[derive(thiserror::Error, Debug)]
pub enum ScrollreelError {
    /// Invalid user-provided configuration or host input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame index outside `[0, len)` reached a store or renderer API.
    #[error("frame index {index} out of range (frame count {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: u32,
        /// Number of frames in the sequence.
        len: u32,
    },

    /// A single frame could not be fetched or decoded.
    #[error("asset load error for frame {index}: {reason}")]
    AssetLoad {
        /// Frame index whose asset failed.
        index: u32,
        /// Human-readable cause.
        reason: String,
    },

    /// A draw was requested while no drawing surface exists.
    #[error("no drawing surface")]
    MissingSurface,

    /// Errors while evaluating animator state.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollreelError {
    /// Build a [`ScrollreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollreelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ScrollreelError::AssetLoad`] value.
    pub fn asset_load(index: u32, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`ScrollreelError::IndexOutOfRange`] value.
    pub fn index_out_of_range(index: u32, len: u32) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
