//! RSASSA-PKCS1-v1_5 signatures over SHA-256.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::key::KeyMaterial;
use crate::provider::SignatureProvider;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;
use tracing::trace;

/// RSA signature provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaProvider;

impl SignatureProvider for RsaProvider {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Rsa
    }

    fn sign(&self, data: &[u8], private_key: &KeyMaterial) -> CryptoResult<Vec<u8>> {
        let key = match private_key {
            KeyMaterial::RsaPrivate(key) => key,
            KeyMaterial::RsaPublic(_) => {
                return Err(CryptoError::KeyError(
                    "RSA signing requires a private key".to_string(),
                ));
            }
            other => {
                return Err(CryptoError::KeyError(format!(
                    "expected an RSA key, got an {} key",
                    other.algorithm()
                )));
            }
        };

        let signing_key = SigningKey::<Sha256>::new(key.clone());
        let signature = signing_key
            .try_sign(data)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8], public_key: &KeyMaterial) -> bool {
        let KeyMaterial::RsaPublic(key) = public_key else {
            trace!(key_algorithm = %public_key.algorithm(), "RSA verification with unusable key");
            return false;
        };

        let Ok(signature) = Signature::try_from(signature) else {
            return false;
        };
        VerifyingKey::<Sha256>::new(key.clone())
            .verify(data, &signature)
            .is_ok()
    }
}
