/// Convenience result type used across drillshow.
pub type DrillResult<T> = Result<T, DrillError>;

/// Top-level error taxonomy used by fallible APIs.
///
/// Interpolation and navigation are total and never produce these; errors only come from
/// loading user data and from the audio back-end.
#[derive(thiserror::Error, Debug)]
pub enum DrillError {
    /// Invalid show, timing or viewport data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Audio back-end failures surfaced through [`crate::AudioPlayer`].
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrillError {
    /// Build a [`DrillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrillError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`DrillError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
