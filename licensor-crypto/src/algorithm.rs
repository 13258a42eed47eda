//! Signature algorithm tags.

use crate::error::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of signature families a license can be signed with.
///
/// The string form is what a license carries in its `SignedWith` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[serde(rename = "RSA")]
    Rsa,
    /// ML-DSA-87 (FIPS 204).
    #[serde(rename = "ML-DSA")]
    MlDsa,
}

impl SignatureAlgorithm {
    /// Every supported algorithm, in tag order.
    pub const ALL: [SignatureAlgorithm; 2] = [Self::Rsa, Self::MlDsa];

    /// Returns the tag string stored in licenses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::MlDsa => "ML-DSA",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    /// Tags are matched exactly; `"rsa"` or `"ML_DSA"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSA" => Ok(Self::Rsa),
            "ML-DSA" => Ok(Self::MlDsa),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}
