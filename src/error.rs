use std::path::{Path, PathBuf};

use thiserror::Error;

/// Kaldine's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Kaldine's crate-wide error type.
///
/// Two families share this enum:
/// - construction errors (`ResourceLoad`, `InvalidParameter`), raised only while
///   building an acoustic model — construction is atomic, so none of these leave
///   a partially-initialized model behind;
/// - streaming errors (`Shape`, `RateMismatch`, `AlreadyFinalized`), raised by
///   `decode` before any session state has been touched, so a rejected call is
///   safely retryable after correction.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured resource path did not resolve to a usable file.
    #[error("failed to load resource '{path}': {reason}")]
    ResourceLoad { path: PathBuf, reason: String },

    /// A numeric tuning parameter was outside the backend's accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An audio buffer was not one-dimensional.
    #[error("audio buffer must be one-dimensional, got shape {shape:?}")]
    Shape { shape: Vec<usize> },

    /// A buffer's sample rate differed from the model's configured rate.
    ///
    /// Audio is never silently resampled; the caller must supply audio at the
    /// rate the model was built for.
    #[error("sample rate mismatch: model expects {expected} Hz, buffer is {got} Hz")]
    RateMismatch { expected: f32, got: f32 },

    /// `decode` was called on a session that has already been finalized.
    #[error("decode called on a finalized session")]
    AlreadyFinalized,

    /// Malformed or unsupported WAV input.
    #[error("invalid WAV input: {0}")]
    Wav(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn resource_load(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::ResourceLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn wav(message: impl Into<String>) -> Self {
        Self::Wav(message.into())
    }
}
