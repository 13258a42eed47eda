use licensor_crypto::{CryptoError, SignatureAlgorithm};

#[test]
fn tag_strings() {
    assert_eq!(SignatureAlgorithm::Rsa.as_str(), "RSA");
    assert_eq!(SignatureAlgorithm::MlDsa.as_str(), "ML-DSA");
    assert_eq!(SignatureAlgorithm::MlDsa.to_string(), "ML-DSA");
}

#[test]
fn parse_roundtrip() {
    for algorithm in SignatureAlgorithm::ALL {
        let parsed: SignatureAlgorithm = algorithm.as_str().parse().unwrap();
        assert_eq!(parsed, algorithm);
    }
}

#[test]
fn parse_is_case_sensitive() {
    let err = "ml-dsa".parse::<SignatureAlgorithm>().unwrap_err();
    assert!(matches!(err, CryptoError::UnsupportedAlgorithm(tag) if tag == "ml-dsa"));
}

#[test]
fn serde_uses_tag_string() {
    let json = serde_json::to_string(&SignatureAlgorithm::MlDsa).unwrap();
    assert_eq!(json, "\"ML-DSA\"");
    let parsed: SignatureAlgorithm = serde_json::from_str("\"RSA\"").unwrap();
    assert_eq!(parsed, SignatureAlgorithm::Rsa);
    assert!(serde_json::from_str::<SignatureAlgorithm>("\"DSA\"").is_err());
}
