//! Key material handles.
//!
//! Keys arrive already parsed (PEM handling lives with the caller). The
//! signature layer only needs to know which family a key belongs to and
//! whether it is private; everything else is passed through to the
//! primitive untouched.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{CryptoError, CryptoResult};
use fips204::ml_dsa_87;
use fips204::traits::SerDes;
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

/// Size of an ML-DSA-87 private key in bytes.
pub const ML_DSA_PRIVATE_KEY_SIZE: usize = ml_dsa_87::SK_LEN;

/// Size of an ML-DSA-87 public key in bytes.
pub const ML_DSA_PUBLIC_KEY_SIZE: usize = ml_dsa_87::PK_LEN;

/// Smallest RSA modulus accepted by [`KeyPair::generate_rsa`].
pub const MIN_RSA_BITS: usize = 1024;

/// An ML-DSA-87 private key, zeroized on drop.
#[derive(Clone)]
pub struct MlDsaPrivateKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl MlDsaPrivateKey {
    /// Creates a private key from its FIPS 204 encoding.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let array: [u8; ML_DSA_PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "ML-DSA private key must be {ML_DSA_PRIVATE_KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        ml_dsa_87::PrivateKey::try_from_bytes(array)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
        })
    }

    /// Returns the encoded key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn to_primitive(&self) -> CryptoResult<ml_dsa_87::PrivateKey> {
        let array: [u8; ML_DSA_PRIVATE_KEY_SIZE] = self
            .bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("ML-DSA private key length".to_string()))?;
        ml_dsa_87::PrivateKey::try_from_bytes(array)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }
}

impl std::fmt::Debug for MlDsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlDsaPrivateKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// An ML-DSA-87 public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlDsaPublicKey {
    bytes: Vec<u8>,
}

impl MlDsaPublicKey {
    /// Creates a public key from its FIPS 204 encoding.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let array: [u8; ML_DSA_PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "ML-DSA public key must be {ML_DSA_PUBLIC_KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        ml_dsa_87::PublicKey::try_from_bytes(array)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the encoded key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn to_primitive(&self) -> Option<ml_dsa_87::PublicKey> {
        let array: [u8; ML_DSA_PUBLIC_KEY_SIZE] = self.bytes.as_slice().try_into().ok()?;
        ml_dsa_87::PublicKey::try_from_bytes(array).ok()
    }
}

/// An opaque key handle accepted by the signature providers.
#[derive(Clone)]
pub enum KeyMaterial {
    /// RSA private key.
    RsaPrivate(RsaPrivateKey),
    /// RSA public key.
    RsaPublic(RsaPublicKey),
    /// ML-DSA-87 private key.
    MlDsaPrivate(MlDsaPrivateKey),
    /// ML-DSA-87 public key.
    MlDsaPublic(MlDsaPublicKey),
}

impl KeyMaterial {
    /// Returns true for keys that can produce signatures.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::RsaPrivate(_) | Self::MlDsaPrivate(_))
    }

    /// Returns the signature family this key belongs to.
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            Self::RsaPrivate(_) | Self::RsaPublic(_) => SignatureAlgorithm::Rsa,
            Self::MlDsaPrivate(_) | Self::MlDsaPublic(_) => SignatureAlgorithm::MlDsa,
        }
    }

    /// Returns the public half of this key.
    ///
    /// RSA private keys carry their public exponent, so the public key is
    /// derived. An ML-DSA private key handle cannot produce its public key;
    /// use the one returned by key generation instead.
    #[must_use]
    pub fn public_key(&self) -> Option<KeyMaterial> {
        match self {
            Self::RsaPrivate(key) => Some(Self::RsaPublic(key.to_public_key())),
            Self::RsaPublic(_) | Self::MlDsaPublic(_) => Some(self.clone()),
            Self::MlDsaPrivate(_) => None,
        }
    }

    /// Encodes the key for distribution.
    ///
    /// ML-DSA keys use their FIPS 204 encoding, RSA public keys PKCS#1 DER.
    /// RSA private keys are not exported.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        match self {
            Self::RsaPrivate(_) => Err(CryptoError::KeyError(
                "RSA private keys cannot be exported".to_string(),
            )),
            Self::RsaPublic(key) => key
                .to_pkcs1_der()
                .map(|der| der.as_bytes().to_vec())
                .map_err(|e| CryptoError::InvalidKey(e.to_string())),
            Self::MlDsaPrivate(key) => Ok(key.as_bytes().to_vec()),
            Self::MlDsaPublic(key) => Ok(key.as_bytes().to_vec()),
        }
    }

    /// Parses a PKCS#1 DER encoded RSA public key.
    pub fn rsa_public_from_der(der: &[u8]) -> CryptoResult<Self> {
        RsaPublicKey::from_pkcs1_der(der)
            .map(Self::RsaPublic)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    /// Parses an ML-DSA-87 private key.
    pub fn ml_dsa_private_from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        MlDsaPrivateKey::from_bytes(bytes).map(Self::MlDsaPrivate)
    }

    /// Parses an ML-DSA-87 public key.
    pub fn ml_dsa_public_from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        MlDsaPublicKey::from_bytes(bytes).map(Self::MlDsaPublic)
    }
}

impl From<RsaPrivateKey> for KeyMaterial {
    fn from(key: RsaPrivateKey) -> Self {
        Self::RsaPrivate(key)
    }
}

impl From<RsaPublicKey> for KeyMaterial {
    fn from(key: RsaPublicKey) -> Self {
        Self::RsaPublic(key)
    }
}

impl From<MlDsaPrivateKey> for KeyMaterial {
    fn from(key: MlDsaPrivateKey) -> Self {
        Self::MlDsaPrivate(key)
    }
}

impl From<MlDsaPublicKey> for KeyMaterial {
    fn from(key: MlDsaPublicKey) -> Self {
        Self::MlDsaPublic(key)
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visibility = if self.is_private() { "private" } else { "public" };
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.algorithm())
            .field("kind", &visibility)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A matching private/public key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub private: KeyMaterial,
    pub public: KeyMaterial,
}

impl KeyPair {
    /// Generates an RSA key pair with the given modulus size.
    pub fn generate_rsa(bits: usize) -> CryptoResult<Self> {
        if bits < MIN_RSA_BITS {
            return Err(CryptoError::KeyGeneration(format!(
                "RSA modulus must be at least {MIN_RSA_BITS} bits, got {bits}"
            )));
        }
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public = private.to_public_key();
        Ok(Self {
            private: KeyMaterial::RsaPrivate(private),
            public: KeyMaterial::RsaPublic(public),
        })
    }

    /// Generates an ML-DSA-87 key pair.
    pub fn generate_ml_dsa() -> CryptoResult<Self> {
        let (public, private) =
            ml_dsa_87::try_keygen().map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(Self {
            private: KeyMaterial::MlDsaPrivate(MlDsaPrivateKey {
                bytes: Zeroizing::new(private.into_bytes().to_vec()),
            }),
            public: KeyMaterial::MlDsaPublic(MlDsaPublicKey {
                bytes: public.into_bytes().to_vec(),
            }),
        })
    }

    /// Returns the family of this pair.
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.private.algorithm()
    }
}
