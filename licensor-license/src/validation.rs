//! The license validation pipeline.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. signature present
//! 2. product id present
//! 3. algorithm tag present and supported
//! 4. signature valid over the recomputed canonical encoding
//! 5. not expired
//! 6. product id matches (wildcards allowed on the license side)
//! 7. device id matches, if the license is device-bound
//!
//! Rejections are ordinary results, not errors. Callers should act on
//! [`ValidationResult::is_valid`] only; the reason text is for logs.

use crate::canonical::format_timestamp;
use crate::license::License;
use crate::matcher::product_id_matches;
use chrono::{DateTime, Utc};
use licensor_crypto::{provider_for_tag, KeyMaterial};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Why a license was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Invalid license: signature is missing.")]
    SignatureMissing,

    #[error("Invalid license: productId is missing.")]
    ProductIdMissing,

    #[error("Invalid license: signature algorithm is missing.")]
    MissingAlgorithm,

    #[error("Invalid license: unsupported signature algorithm '{tag}'. Supported: RSA, ML-DSA.")]
    UnsupportedAlgorithm { tag: String },

    #[error("Invalid license: signature is invalid.")]
    SignatureInvalid,

    #[error("The license has expired. Expiration date: {}", format_timestamp(.expiration_date))]
    Expired { expiration_date: DateTime<Utc> },

    #[error("Product id mismatch. (License productId: {license}, requested productId: {requested})")]
    ProductIdMismatch { license: String, requested: String },

    #[error(
        "Device id mismatch. (License deviceId: {license}, requested deviceId: {})",
        .requested.as_deref().unwrap_or("<none>")
    )]
    DeviceIdMismatch {
        license: String,
        requested: Option<String>,
    },
}

/// Outcome of validating one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    failure: Option<ValidationFailure>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub fn ok() -> Self {
        Self { failure: None }
    }

    /// A failing result.
    #[must_use]
    pub fn fail(failure: ValidationFailure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the diagnostic message of a failed result.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// Returns the structured failure.
    #[must_use]
    pub fn failure(&self) -> Option<&ValidationFailure> {
        self.failure.as_ref()
    }

    /// Splits into `(valid, reason)`.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<String>) {
        (self.is_valid(), self.reason())
    }
}

impl From<ValidationFailure> for ValidationResult {
    fn from(failure: ValidationFailure) -> Self {
        Self::fail(failure)
    }
}

/// Runs the validation pipeline.
#[derive(Debug, Clone)]
pub struct LicenseValidator {
    clock: Arc<dyn Clock>,
}

impl Default for LicenseValidator {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }
}

impl LicenseValidator {
    /// Creates a validator using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with a custom time source.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Decides whether `license` authorizes `product_id` (on `device_id`).
    pub fn validate(
        &self,
        license: &License,
        public_key: &KeyMaterial,
        product_id: &str,
        device_id: Option<&str>,
    ) -> ValidationResult {
        match self.check(license, public_key, product_id, device_id) {
            Ok(()) => {
                trace!(license_id = license.id().unwrap_or_default(), product_id, "license accepted");
                ValidationResult::ok()
            }
            Err(failure) => {
                debug!(
                    license_id = license.id().unwrap_or_default(),
                    product_id,
                    reason = %failure,
                    "license rejected"
                );
                ValidationResult::fail(failure)
            }
        }
    }

    fn check(
        &self,
        license: &License,
        public_key: &KeyMaterial,
        product_id: &str,
        device_id: Option<&str>,
    ) -> Result<(), ValidationFailure> {
        let signature = license
            .signature()
            .ok_or(ValidationFailure::SignatureMissing)?;
        let license_product = license
            .product_id()
            .ok_or(ValidationFailure::ProductIdMissing)?;
        let tag = license
            .signed_with()
            .ok_or(ValidationFailure::MissingAlgorithm)?;
        let provider = provider_for_tag(tag).map_err(|_| ValidationFailure::UnsupportedAlgorithm {
            tag: tag.to_string(),
        })?;

        if !provider.verify(&license.data_for_signature(), signature, public_key) {
            return Err(ValidationFailure::SignatureInvalid);
        }

        if let Some(expiration_date) = license.expiration_date() {
            if expiration_date < self.clock.now() {
                return Err(ValidationFailure::Expired { expiration_date });
            }
        }

        if !product_id_matches(license_product, product_id) {
            return Err(ValidationFailure::ProductIdMismatch {
                license: license_product.to_string(),
                requested: product_id.to_string(),
            });
        }

        if let Some(bound) = license.device_id() {
            if Some(bound) != device_id {
                return Err(ValidationFailure::DeviceIdMismatch {
                    license: bound.to_string(),
                    requested: device_id.map(str::to_string),
                });
            }
        }

        Ok(())
    }
}
