/// Error type definitions
use thiserror::Error;

/// Failures reported by a signature provider.
///
/// `VerificationFailed` is the expected negative outcome of `verify()`; every
/// other variant means the provider itself could not do its job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Scheme unavailable: {0}")]
    InitFailure(String),

    #[error("Key generation failed: {0}")]
    KeygenFailure(String),

    #[error("Signing failed: {0}")]
    SignFailure(String),

    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),
}

impl CryptoError {
    /// True when the error is a rejected signature rather than a provider malfunction
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, CryptoError::VerificationFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
