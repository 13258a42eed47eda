//! The uniform sign/verify contract and the closed algorithm dispatch.
//!
//! Consumers hold a `&'static dyn SignatureProvider` obtained from
//! [`provider_for`] or [`provider_for_tag`]. The set of providers is fixed
//! at compile time; there is no way to register another one.

use crate::algorithm::SignatureAlgorithm;
use crate::error::CryptoResult;
use crate::key::KeyMaterial;
use crate::ml_dsa_provider::MlDsaProvider;
use crate::rsa_provider::RsaProvider;

/// One signature family behind a sign/verify pair.
pub trait SignatureProvider: Send + Sync {
    /// The family this provider implements.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Signs `data` with a private key of this family.
    ///
    /// Fails with [`CryptoError::KeyError`](crate::CryptoError::KeyError) when the key is
    /// public or belongs to another family.
    fn sign(&self, data: &[u8], private_key: &KeyMaterial) -> CryptoResult<Vec<u8>>;

    /// Checks `signature` over `data`.
    ///
    /// Returns false for wrong keys, malformed signatures and tampered data.
    /// Never fails and never panics.
    fn verify(&self, data: &[u8], signature: &[u8], public_key: &KeyMaterial) -> bool;
}

static RSA: RsaProvider = RsaProvider;
static ML_DSA: MlDsaProvider = MlDsaProvider;

/// Returns the provider for an algorithm.
#[must_use]
pub fn provider_for(algorithm: SignatureAlgorithm) -> &'static dyn SignatureProvider {
    match algorithm {
        SignatureAlgorithm::Rsa => &RSA,
        SignatureAlgorithm::MlDsa => &ML_DSA,
    }
}

/// Resolves a `SignedWith` tag to its provider.
pub fn provider_for_tag(tag: &str) -> CryptoResult<&'static dyn SignatureProvider> {
    let algorithm: SignatureAlgorithm = tag.parse()?;
    Ok(provider_for(algorithm))
}
