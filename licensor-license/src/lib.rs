//! Signed software licenses for Licensor.
//!
//! This crate handles:
//! - The license record and its canonical signed encoding
//! - Building and signing licenses with RSA or ML-DSA
//! - Validating a license for a product request (signature, expiry,
//!   wildcard product id, device binding)
//! - Aggregating validation over a store of loaded licenses
//!
//! # Signed Encoding
//!
//! A license is signed over `Id: …, CreationDate: …, ProductId: …, DeviceId: …,
//! ExpirationDate: …, Owner: …, SignedWith: …` (absent fields skipped, values
//! escaped). The encoding is recomputed on every check, so editing a field
//! after signing always invalidates the license.
//!
//! # Persisted Format
//!
//! Licenses serialize to a flat JSON object with PascalCase keys and a
//! base64 `Signature`.

mod builder;
mod canonical;
#[cfg(feature = "device")]
mod device;
mod error;
mod license;
mod matcher;
mod store;
mod validation;

pub use builder::LicenseBuilder;
pub use canonical::format_timestamp;
#[cfg(feature = "device")]
pub use device::{DeviceId, DeviceInfo};
pub use error::{LicenseError, LicenseResult};
pub use license::{License, LicenseDraft};
pub use matcher::{product_id_matches, ProductPattern};
pub use store::LicenseStore;
pub use validation::{
    Clock, FixedClock, LicenseValidator, SystemClock, ValidationFailure, ValidationResult,
};

pub use licensor_crypto::{KeyMaterial, KeyPair, SignatureAlgorithm};
