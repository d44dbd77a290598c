use std::io;

/// Convenience alias for encode results.
pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

/// Errors produced while encoding a value.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// RLP has no representation for negative integers.
    #[error("cannot encode negative big integer")]
    NegativeBigInt,
    /// Failure raised by a manual [`Encodable`](crate::Encodable)
    /// implementation, propagated verbatim.
    #[error(transparent)]
    Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
    /// Sink write failure on the streaming paths.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl EncodeError {
    /// Wraps an arbitrary message as a custom encoder failure.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into().into())
    }
}
