/// Convenience result type used across shotpolish.
pub type PolishResult<T> = Result<T, PolishError>;

/// Top-level error taxonomy used by the compositing and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum PolishError {
    /// Malformed caller input: bad aspect ratio, zero-size image, unknown frame, bad JSON.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A render or export was requested without a source image.
    #[error("no image loaded")]
    NoImageLoaded,

    /// A decorative asset a renderer depends on is not loaded (yet).
    ///
    /// Frame renderers return this; the compositor recovers by skipping the phase.
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    /// The raster target could not be encoded or delivered.
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolishError {
    /// Build a [`PolishError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`PolishError::AssetUnavailable`] value.
    pub fn asset_unavailable(msg: impl Into<String>) -> Self {
        Self::AssetUnavailable(msg.into())
    }

    /// Build a [`PolishError::SerializationFailure`] value.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
