//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use licensor_license::{KeyPair, License, LicenseBuilder};
use std::sync::OnceLock;

/// Small modulus keeps key generation quick; production keys should be 2048+.
pub const TEST_RSA_BITS: usize = 1024;

/// Returns an RSA key pair shared by every test in the binary.
pub fn rsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_rsa(TEST_RSA_BITS).unwrap())
}

/// Returns an ML-DSA key pair shared by every test in the binary.
pub fn ml_dsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_ml_dsa().unwrap())
}

/// A fixed instant for deterministic timestamps.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
}

/// Builds an RSA-signed license for `product_id`.
pub fn rsa_license(product_id: &str) -> License {
    LicenseBuilder::new()
        .product_id(product_id)
        .sign_with_rsa(rsa_keypair().private.clone())
        .unwrap()
        .build()
        .unwrap()
}

/// Builds an ML-DSA-signed license for `product_id`.
pub fn ml_dsa_license(product_id: &str) -> License {
    LicenseBuilder::new()
        .product_id(product_id)
        .sign_with_ml_dsa(ml_dsa_keypair().private.clone())
        .unwrap()
        .build()
        .unwrap()
}

/// Builds a fully populated RSA-signed license.
pub fn full_rsa_license() -> License {
    LicenseBuilder::new()
        .id("01J0LICENSE")
        .creation_date(fixed_time())
        .product_id("MyApp 1.*")
        .device_id("device-A")
        .expiration_date(Utc::now() + chrono::Duration::days(1))
        .owner("ACME Corp")
        .sign_with_rsa(rsa_keypair().private.clone())
        .unwrap()
        .build()
        .unwrap()
}
