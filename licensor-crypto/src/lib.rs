//! Signature layer for Licensor.
//!
//! This crate provides:
//! - Opaque key handles for RSA and ML-DSA-87 key material
//! - The `SignatureProvider` sign/verify contract
//! - Closed dispatch from a `SignedWith` tag to its provider
//!
//! # Supported Algorithms
//!
//! | Tag | Scheme |
//! |-----|--------|
//! | `RSA` | RSASSA-PKCS1-v1_5, SHA-256 |
//! | `ML-DSA` | ML-DSA-87 (FIPS 204), empty context |
//!
//! The primitives come from the `rsa` and `fips204` crates. Nothing here
//! stores or manages keys.

mod algorithm;
mod error;
mod key;
mod ml_dsa_provider;
mod provider;
mod rsa_provider;

pub use algorithm::SignatureAlgorithm;
pub use error::{CryptoError, CryptoResult};
pub use key::{
    KeyMaterial, KeyPair, MlDsaPrivateKey, MlDsaPublicKey, MIN_RSA_BITS,
    ML_DSA_PRIVATE_KEY_SIZE, ML_DSA_PUBLIC_KEY_SIZE,
};
pub use ml_dsa_provider::{MlDsaProvider, ML_DSA_SIGNATURE_SIZE};
pub use provider::{provider_for, provider_for_tag, SignatureProvider};
pub use rsa_provider::RsaProvider;

/// Re-exported so callers can build RSA keys without a direct dependency.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
