//! ML-DSA-87 (FIPS 204) signatures.
//!
//! Signs with an empty context string, so signatures interoperate with
//! other FIPS 204 implementations that use the default context.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::key::KeyMaterial;
use crate::provider::SignatureProvider;
use fips204::ml_dsa_87;
use fips204::traits::{Signer, Verifier};
use tracing::trace;

/// Size of an ML-DSA-87 signature in bytes.
pub const ML_DSA_SIGNATURE_SIZE: usize = ml_dsa_87::SIG_LEN;

const CONTEXT: &[u8] = &[];

/// ML-DSA signature provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlDsaProvider;

impl SignatureProvider for MlDsaProvider {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::MlDsa
    }

    fn sign(&self, data: &[u8], private_key: &KeyMaterial) -> CryptoResult<Vec<u8>> {
        let key = match private_key {
            KeyMaterial::MlDsaPrivate(key) => key.to_primitive()?,
            KeyMaterial::MlDsaPublic(_) => {
                return Err(CryptoError::KeyError(
                    "ML-DSA signing requires a private key".to_string(),
                ));
            }
            other => {
                return Err(CryptoError::KeyError(format!(
                    "expected an ML-DSA key, got an {} key",
                    other.algorithm()
                )));
            }
        };

        let signature = key
            .try_sign(data, CONTEXT)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8], public_key: &KeyMaterial) -> bool {
        let KeyMaterial::MlDsaPublic(key) = public_key else {
            trace!(key_algorithm = %public_key.algorithm(), "ML-DSA verification with unusable key");
            return false;
        };
        let Some(key) = key.to_primitive() else {
            return false;
        };
        let Ok(signature) = <[u8; ML_DSA_SIGNATURE_SIZE]>::try_from(signature) else {
            return false;
        };
        key.verify(data, &signature, CONTEXT)
    }
}
