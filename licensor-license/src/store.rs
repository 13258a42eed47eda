//! In-memory collection of loaded licenses.
//!
//! The store answers "is there a valid license for this product?" by running
//! the validator over candidate entries. Candidates are picked by exact
//! equality on the stored product id; wildcard matching still happens inside
//! the validator.

use crate::license::License;
use crate::validation::{LicenseValidator, ValidationResult};
use licensor_crypto::KeyMaterial;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Entry {
    license: License,
    public_key: Option<KeyMaterial>,
}

/// A thread-safe set of licenses with their verification keys.
///
/// Either every entry carries its own public key ([`LicenseStore::new`] +
/// [`add`](LicenseStore::add)), or the store holds one key for all of them
/// ([`LicenseStore::with_public_key`] + [`add_license`](LicenseStore::add_license)).
#[derive(Debug, Default)]
pub struct LicenseStore {
    entries: RwLock<Vec<Entry>>,
    shared_key: Option<KeyMaterial>,
    validator: LicenseValidator,
}

impl LicenseStore {
    /// Creates a store where each license is added with its own key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that verifies every license with `public_key`.
    #[must_use]
    pub fn with_public_key(public_key: KeyMaterial) -> Self {
        Self {
            shared_key: Some(public_key),
            ..Self::default()
        }
    }

    /// Replaces the validator (e.g. to inject a clock).
    #[must_use]
    pub fn with_validator(mut self, validator: LicenseValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Adds a license verified by `public_key`. Nothing is validated here.
    pub fn add(&self, license: License, public_key: KeyMaterial) {
        self.push(Entry {
            license,
            public_key: Some(public_key),
        });
    }

    /// Adds a license verified by the store's shared key.
    pub fn add_license(&self, license: License) {
        self.push(Entry {
            license,
            public_key: None,
        });
    }

    /// Returns true if some stored license for exactly `product_id` passes
    /// full validation.
    pub fn has_valid_license(&self, product_id: &str, device_id: Option<&str>) -> bool {
        self.find_valid_license(product_id, device_id).is_some()
    }

    /// Returns the first stored license for exactly `product_id` that passes
    /// full validation.
    pub fn find_valid_license(&self, product_id: &str, device_id: Option<&str>) -> Option<License> {
        let candidates: Vec<Entry> = self
            .read()
            .iter()
            .filter(|entry| entry.license.product_id() == Some(product_id))
            .cloned()
            .collect();

        candidates.into_iter().find_map(|entry| {
            let Some(key) = entry.public_key.as_ref().or(self.shared_key.as_ref()) else {
                debug!(
                    license_id = entry.license.id().unwrap_or_default(),
                    "no public key for stored license"
                );
                return None;
            };
            self.validator
                .validate(&entry.license, key, product_id, device_id)
                .is_valid()
                .then_some(entry.license)
        })
    }

    /// Validates a license (stored or not) with the store's validator.
    pub fn validate(
        &self,
        license: &License,
        public_key: &KeyMaterial,
        product_id: &str,
        device_id: Option<&str>,
    ) -> ValidationResult {
        self.validator.validate(license, public_key, product_id, device_id)
    }

    /// Returns a copy of every stored license.
    pub fn loaded_licenses(&self) -> Vec<License> {
        self.read().iter().map(|entry| entry.license.clone()).collect()
    }

    /// Returns the number of stored licenses.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn push(&self, entry: Entry) {
        self.write().push(entry);
    }

    // Entries are appended whole under the write lock, so a poisoned lock
    // still guards a consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("license store lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("license store lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}
