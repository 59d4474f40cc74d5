/// Convenience result type used across squarefit.
pub type SquareResult<T> = Result<T, SquareError>;

/// Top-level error taxonomy used by library APIs.
///
/// Every variant is recoverable: the session maps each one to a well-defined state
/// (prior image kept, or back to "no image loaded") instead of aborting.
#[derive(thiserror::Error, Debug)]
pub enum SquareError {
    /// The source raster has a zero dimension, is too large, or could not be decoded.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// The selected file does not declare an image media type.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Encoding or exporting the composited buffer failed.
    #[error("export failure: {0}")]
    ExportFailure(String),

    /// Invalid configuration or parameter data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SquareError {
    /// Build a [`SquareError::InvalidSource`] value.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    /// Build a [`SquareError::UnsupportedFileType`] value.
    pub fn unsupported_file_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedFileType(msg.into())
    }

    /// Build a [`SquareError::ExportFailure`] value.
    pub fn export_failure(msg: impl Into<String>) -> Self {
        Self::ExportFailure(msg.into())
    }

    /// Build a [`SquareError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
