//! Shared test helpers for signature tests.

#![allow(dead_code)]

use licensor_crypto::KeyPair;
use std::sync::OnceLock;

/// Small modulus keeps key generation quick; production keys should be 2048+.
pub const TEST_RSA_BITS: usize = 1024;

/// Returns an RSA key pair shared by every test in the binary.
pub fn rsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_rsa(TEST_RSA_BITS).unwrap())
}

/// Returns a second, unrelated RSA key pair.
pub fn other_rsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_rsa(TEST_RSA_BITS).unwrap())
}

/// Returns an ML-DSA key pair shared by every test in the binary.
pub fn ml_dsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_ml_dsa().unwrap())
}

/// Returns a second, unrelated ML-DSA key pair.
pub fn other_ml_dsa_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate_ml_dsa().unwrap())
}
