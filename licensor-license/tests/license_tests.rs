mod common;

use common::{fixed_time, full_rsa_license, ml_dsa_keypair, ml_dsa_license, rsa_keypair, rsa_license};
use licensor_license::{License, LicenseDraft, LicenseError};
use pretty_assertions::assert_eq;

// ── Canonical encoding ───────────────────────────────────────────

#[test]
fn encoding_lists_fields_in_order() {
    let license = full_rsa_license();
    let data = String::from_utf8(license.data_for_signature()).unwrap();

    let positions: Vec<usize> = [
        "Id: 01J0LICENSE",
        "CreationDate: 2025-03-14T15:09:26.000000000Z",
        "ProductId: MyApp 1.*",
        "DeviceId: device-A",
        "ExpirationDate: ",
        "Owner: ACME Corp",
        "SignedWith: RSA",
    ]
    .iter()
    .map(|fragment| data.find(fragment).expect(fragment))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{data}");
}

#[test]
fn encoding_skips_absent_fields() {
    let draft = LicenseDraft {
        product_id: Some("MyApp".into()),
        ..Default::default()
    };
    assert_eq!(draft.data_for_signature(), b"ProductId: MyApp".to_vec());
}

#[test]
fn encoding_ignores_signature() {
    let license = rsa_license("MyApp");
    let mut draft = license.to_draft();
    draft.signature = Some(vec![0; 3]);
    assert_eq!(draft.into_license().data_for_signature(), license.data_for_signature());
}

#[test]
fn encoding_carries_id_not_device_id() {
    let draft = LicenseDraft {
        id: Some("L-1".into()),
        device_id: Some("D-9".into()),
        ..Default::default()
    };
    assert_eq!(
        String::from_utf8(draft.data_for_signature()).unwrap(),
        "Id: L-1, DeviceId: D-9"
    );
}

#[test]
fn delimiter_in_value_does_not_collide() {
    let forged = LicenseDraft {
        product_id: Some("MyApp".into()),
        owner: Some("Eve, SignedWith: RSA".into()),
        ..Default::default()
    };
    let honest = LicenseDraft {
        product_id: Some("MyApp".into()),
        owner: Some("Eve".into()),
        signed_with: Some("RSA".into()),
        ..Default::default()
    };
    assert_ne!(forged.data_for_signature(), honest.data_for_signature());
}

// ── Drafts ───────────────────────────────────────────────────────

#[test]
fn draft_roundtrip_is_identity() {
    let license = full_rsa_license();
    assert_eq!(license.to_draft().into_license(), license);
}

#[test]
fn draft_changes_encoding() {
    let license = full_rsa_license();
    let mut draft = license.to_draft();
    draft.owner = Some("Someone Else".into());
    assert_ne!(draft.data_for_signature(), license.data_for_signature());
}

// ── verify_signature ─────────────────────────────────────────────

#[test]
fn verify_signature_with_matching_key() {
    let license = ml_dsa_license("MyApp");
    assert!(license.verify_signature(&ml_dsa_keypair().public).unwrap());
    assert!(!license.verify_signature(&rsa_keypair().public).unwrap());
}

#[test]
fn verify_signature_on_unsigned_license_fails_fast() {
    let license = LicenseDraft {
        product_id: Some("MyApp".into()),
        signed_with: Some("RSA".into()),
        ..Default::default()
    }
    .into_license();
    let result = license.verify_signature(&rsa_keypair().public);
    assert!(matches!(result, Err(LicenseError::Unsigned)));
}

#[test]
fn verify_signature_with_unknown_tag_fails_fast() {
    let mut draft = rsa_license("MyApp").to_draft();
    draft.signed_with = Some("DSA".into());
    let result = draft.into_license().verify_signature(&rsa_keypair().public);
    assert!(matches!(result, Err(LicenseError::Crypto(_))));
}

// ── Persistence ──────────────────────────────────────────────────

#[test]
fn json_uses_pascal_case_keys() {
    let json = full_rsa_license().to_json().unwrap();
    for key in [
        "\"Id\"",
        "\"CreationDate\"",
        "\"ProductId\"",
        "\"DeviceId\"",
        "\"ExpirationDate\"",
        "\"Owner\"",
        "\"SignedWith\"",
        "\"Signature\"",
    ] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
}

#[test]
fn json_omits_absent_fields() {
    let json = rsa_license("MyApp").to_json().unwrap();
    assert!(!json.contains("DeviceId"));
    assert!(!json.contains("ExpirationDate"));
    assert!(!json.contains("Owner"));
}

#[test]
fn json_roundtrip_preserves_encoding_rsa() {
    let license = full_rsa_license();
    let restored = License::from_json(&license.to_json().unwrap()).unwrap();
    assert_eq!(restored.data_for_signature(), license.data_for_signature());
    assert_eq!(restored, license);
}

#[test]
fn json_roundtrip_preserves_encoding_ml_dsa() {
    let license = ml_dsa_license("MyApp");
    let restored = License::from_json(&license.to_json().unwrap()).unwrap();
    assert_eq!(restored.data_for_signature(), license.data_for_signature());
    assert_eq!(restored.signature(), license.signature());
}

#[test]
fn save_load_roundtrip() {
    let license = full_rsa_license();
    let mut buffer = Vec::new();
    license.save(&mut buffer).unwrap();
    let restored = License::load(buffer.as_slice()).unwrap();
    assert_eq!(restored.data_for_signature(), license.data_for_signature());
}

#[test]
fn load_accepts_nulls_for_absent_fields() {
    let json = r#"{
        "Id": "L1",
        "ProductId": "MyApp",
        "DeviceId": null,
        "ExpirationDate": null,
        "Owner": null,
        "SignedWith": "RSA",
        "Signature": "AAEC"
    }"#;
    let license = License::from_json(json).unwrap();
    assert_eq!(license.device_id(), None);
    assert_eq!(license.signature(), Some(&[0u8, 1, 2][..]));
}

#[test]
fn load_rejects_bad_signature_base64() {
    let json = r#"{"ProductId": "MyApp", "Signature": "***"}"#;
    assert!(matches!(
        License::from_json(json),
        Err(LicenseError::Serialization(_))
    ));
}

#[test]
fn nanosecond_timestamps_survive_json() {
    use chrono::Timelike;
    let created = fixed_time().with_nanosecond(123_456_789).unwrap();
    let license = licensor_license::LicenseBuilder::new()
        .product_id("MyApp")
        .creation_date(created)
        .sign_with_rsa(rsa_keypair().private.clone())
        .unwrap()
        .build()
        .unwrap();
    let restored = License::from_json(&license.to_json().unwrap()).unwrap();
    assert_eq!(restored.creation_date(), Some(created));
    assert_eq!(restored.data_for_signature(), license.data_for_signature());
}
