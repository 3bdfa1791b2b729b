/// Crate-wide result alias.
pub type HitsujunResult<T> = Result<T, HitsujunError>;

/// Errors raised at the crate boundaries (sources, mounting, configuration).
///
/// The animation driver itself never returns these for UI-driven misuse; it logs and no-ops.
#[derive(thiserror::Error, Debug)]
pub enum HitsujunError {
    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A requested asset (stroke SVG, metadata entry) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Markup that could not be parsed as an SVG document.
    #[error("markup error: {0}")]
    Markup(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HitsujunError {
    /// Build a [`HitsujunError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HitsujunError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`HitsujunError::Markup`].
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`HitsujunError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for "asset unavailable" conditions that a UI shows as a placeholder.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Markup(_))
    }
}

impl From<serde_json::Error> for HitsujunError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
