/// Convenience result type used across Beamfield.
pub type BeamResult<T> = Result<T, BeamError>;

/// Top-level error taxonomy used by the renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum BeamError {
    /// Invalid user-provided scene or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing scene data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeamError {
    /// Build a [`BeamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BeamError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BeamError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
