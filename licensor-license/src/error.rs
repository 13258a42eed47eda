//! Error types for the licensing module.
//!
//! These cover building, persisting and misusing licenses. A license that
//! simply fails validation is not an error; see [`ValidationResult`](crate::ValidationResult).

use licensor_crypto::CryptoError;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A required builder field was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Neither RSA nor ML-DSA signing was selected.
    #[error("no signing method selected (call sign_with_rsa or sign_with_ml_dsa)")]
    MissingSigningMethod,

    /// The signing key is public or of the wrong family.
    #[error("key error: {0}")]
    KeyError(String),

    /// An operation that needs a signature was called on an unsigned license.
    #[error("license is not signed")]
    Unsigned,

    /// Signature layer failure.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading or writing a license stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
