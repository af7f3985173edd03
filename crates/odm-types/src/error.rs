//! Error types for value construction and conversion.

/// Errors raised while building typed values from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// ObjectId source string is not 24 hex characters.
    #[error("invalid ObjectId '{0}': expected 24 hex characters")]
    InvalidObjectId(String),

    /// Extended JSON `$binary` payload could not be decoded.
    #[error("invalid $binary payload: {0}")]
    InvalidBinary(String),

    /// Extended JSON `$date` is not an integer millisecond timestamp in range.
    #[error("invalid $date value: {0}")]
    InvalidDate(String),

    /// Number does not fit any numeric variant.
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
}
