use crate::animation::value::PropertyKind;
use crate::foundation::core::TargetId;

/// Convenience result type used across scrubline.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction-time problems surface as errors. Degenerate measurements and writes to
/// detached targets are runtime states and never reach callers.
#[derive(thiserror::Error, Debug)]
pub enum ScrubError {
    /// Invalid construction parameters (degenerate region, zero segments, bad offsets).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two steps on the same track overlap without an explicit override.
    #[error(
        "configuration error: overlapping steps on '{target}'.{property}: [{a_start}, {a_end}) and [{b_start}, {b_end})"
    )]
    OverlappingSteps {
        /// Target of both steps.
        target: TargetId,
        /// Property of both steps.
        property: PropertyKind,
        /// Start of the earlier step.
        a_start: f64,
        /// End of the earlier step.
        a_end: f64,
        /// Start of the later step.
        b_start: f64,
        /// End of the later step.
        b_end: f64,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    /// Build a [`ScrubError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrubError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for authoring mistakes caught at build time.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::OverlappingSteps { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
