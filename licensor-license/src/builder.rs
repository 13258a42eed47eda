//! License construction and signing.

use crate::error::{LicenseError, LicenseResult};
use crate::license::{License, LicenseDraft};
use chrono::{DateTime, Utc};
use licensor_crypto::{provider_for, CryptoError, KeyMaterial, SignatureAlgorithm};
use tracing::debug;
use uuid::Uuid;

/// The selected signature family together with its private key.
#[derive(Debug, Clone)]
enum SigningMethod {
    Rsa(KeyMaterial),
    MlDsa(KeyMaterial),
}

impl SigningMethod {
    fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            Self::Rsa(_) => SignatureAlgorithm::Rsa,
            Self::MlDsa(_) => SignatureAlgorithm::MlDsa,
        }
    }

    fn key(&self) -> &KeyMaterial {
        match self {
            Self::Rsa(key) | Self::MlDsa(key) => key,
        }
    }
}

/// Assembles and signs a [`License`].
///
/// ```ignore
/// let license = LicenseBuilder::new()
///     .product_id("MyApp 1.*")
///     .expiration_date(Utc::now() + Duration::days(30))
///     .sign_with_rsa(private_key)?
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LicenseBuilder {
    draft: LicenseDraft,
    signing: Option<SigningMethod>,
}

impl LicenseBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing draft, e.g. to re-issue a changed license.
    ///
    /// Any algorithm tag or signature on the draft is discarded.
    #[must_use]
    pub fn from_draft(mut draft: LicenseDraft) -> Self {
        draft.signed_with = None;
        draft.signature = None;
        Self {
            draft,
            signing: None,
        }
    }

    /// Sets the license id. A UUID v7 is generated when unset.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.draft.id = Some(id.into());
        self
    }

    /// Sets the issuance time. Defaults to now.
    #[must_use]
    pub fn creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.draft.creation_date = Some(creation_date);
        self
    }

    /// Sets the product pattern. Required.
    #[must_use]
    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.draft.product_id = Some(product_id.into());
        self
    }

    /// Binds the license to one device.
    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.draft.device_id = Some(device_id.into());
        self
    }

    /// Sets the expiration time. Without one the license never expires.
    #[must_use]
    pub fn expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.draft.expiration_date = Some(expiration_date);
        self
    }

    /// Sets the licensee.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.draft.owner = Some(owner.into());
        self
    }

    /// Selects RSA signing. Replaces any earlier selection.
    pub fn sign_with_rsa(mut self, private_key: impl Into<KeyMaterial>) -> LicenseResult<Self> {
        let key = checked_private_key(private_key.into(), SignatureAlgorithm::Rsa)?;
        self.signing = Some(SigningMethod::Rsa(key));
        Ok(self)
    }

    /// Selects ML-DSA signing. Replaces any earlier selection.
    pub fn sign_with_ml_dsa(mut self, private_key: impl Into<KeyMaterial>) -> LicenseResult<Self> {
        let key = checked_private_key(private_key.into(), SignatureAlgorithm::MlDsa)?;
        self.signing = Some(SigningMethod::MlDsa(key));
        Ok(self)
    }

    /// Fills defaults, signs the canonical encoding and returns the license.
    ///
    /// # Errors
    ///
    /// `MissingField` without a product id, `MissingSigningMethod` without a
    /// signing selection, `KeyError` if the provider rejects the key.
    pub fn build(self) -> LicenseResult<License> {
        let Self { mut draft, signing } = self;

        if draft.product_id.is_none() {
            return Err(LicenseError::MissingField("product_id"));
        }
        let signing = signing.ok_or(LicenseError::MissingSigningMethod)?;
        let algorithm = signing.algorithm();

        draft
            .id
            .get_or_insert_with(|| Uuid::now_v7().to_string());
        draft.creation_date.get_or_insert_with(Utc::now);
        draft.signed_with = Some(algorithm.as_str().to_string());

        let data = draft.data_for_signature();
        let signature = provider_for(algorithm)
            .sign(&data, signing.key())
            .map_err(|e| match e {
                CryptoError::KeyError(msg) => LicenseError::KeyError(msg),
                other => LicenseError::Crypto(other),
            })?;
        draft.signature = Some(signature);

        debug!(
            license_id = draft.id.as_deref().unwrap_or_default(),
            product_id = draft.product_id.as_deref().unwrap_or_default(),
            algorithm = %algorithm,
            "license built"
        );
        Ok(draft.into_license())
    }
}

fn checked_private_key(
    key: KeyMaterial,
    algorithm: SignatureAlgorithm,
) -> LicenseResult<KeyMaterial> {
    if !key.is_private() {
        return Err(LicenseError::KeyError(format!(
            "{algorithm} signing requires a private key"
        )));
    }
    if key.algorithm() != algorithm {
        return Err(LicenseError::KeyError(format!(
            "{algorithm} signing was given an {} key",
            key.algorithm()
        )));
    }
    Ok(key)
}
