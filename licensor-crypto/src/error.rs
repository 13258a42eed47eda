//! Error types for the signature layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while handling keys or producing signatures.
///
/// Verification never produces one of these: a signature that does not
/// check out is reported as `false`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The key cannot be used for the requested operation
    /// (public key passed for signing, or a key of the other family).
    #[error("key error: {0}")]
    KeyError(String),

    /// The algorithm tag is not one of the supported families.
    #[error("unsupported signature algorithm '{0}' (supported: RSA, ML-DSA)")]
    UnsupportedAlgorithm(String),

    /// The signature primitive failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Key bytes could not be decoded.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Key pair generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}
