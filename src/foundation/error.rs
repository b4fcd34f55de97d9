/// Convenience result type used across telepage.
pub type TelepageResult<T> = Result<T, TelepageError>;

/// Why an identifier string could not be turned into a payload.
///
/// These are reported to the caller as "unparseable"; they never leave the session in a partial
/// state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing but whitespace was supplied.
    #[error("import source is empty")]
    Empty,

    /// The source has no `#` fragment marker.
    #[error("no '#' fragment found in import source")]
    MissingFragment,

    /// The fragment is present but holds no alphabet symbols.
    #[error("fragment holds no payload")]
    EmptyPayload,

    /// A bare payload with no metadata delimiter that is too short to be a legacy page.
    #[error("payload of {len} symbols has no ':' delimiter and is shorter than {min}")]
    Unparseable {
        /// Sanitized payload length.
        len: usize,
        /// Minimum accepted length for delimiter-less payloads.
        min: usize,
    },
}

/// Top-level error taxonomy used by telepage APIs.
#[derive(thiserror::Error, Debug)]
pub enum TelepageError {
    /// Invalid user-provided page, template or art data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The import source could not be located or sanitized.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// Rasterization or post-processing failures.
    #[error("render error: {0}")]
    Render(String),

    /// Writing a bitmap out failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TelepageError {
    /// Build a [`TelepageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TelepageError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TelepageError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`TelepageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
