//! The license record and its mutable draft.
//!
//! A [`License`] is read-only once it exists. Changing any field means going
//! through a [`LicenseDraft`] and either re-signing it with the builder or
//! freezing it as-is, in which case the old signature no longer matches.

use crate::canonical::{self, SignedFields};
use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use licensor_crypto::{provider_for_tag, KeyMaterial};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A signed grant of usage rights for a product.
///
/// Serializes to a flat JSON record with PascalCase keys. The signature is
/// base64 encoded; absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct License {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiration_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signed_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "signature_b64")]
    signature: Option<Vec<u8>>,
}

impl License {
    /// Returns the license id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the issuance time.
    #[must_use]
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    /// Returns the product pattern (may contain `*`).
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Returns the device this license is bound to, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Returns the expiration time, or None if the license never expires.
    #[must_use]
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Returns the licensee.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the `SignedWith` algorithm tag.
    #[must_use]
    pub fn signed_with(&self) -> Option<&str> {
        self.signed_with.as_deref()
    }

    /// Returns the raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// Returns true if a signature is attached.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Returns the canonical bytes covered by the signature.
    #[must_use]
    pub fn data_for_signature(&self) -> Vec<u8> {
        canonical::encode(&self.signed_fields())
    }

    /// Checks the signature against `public_key`.
    ///
    /// Unlike validation, this treats an unsigned license or an unknown
    /// algorithm tag as a caller bug and returns an error.
    pub fn verify_signature(&self, public_key: &KeyMaterial) -> LicenseResult<bool> {
        let signature = self.signature.as_deref().ok_or(LicenseError::Unsigned)?;
        let tag = self
            .signed_with
            .as_deref()
            .ok_or(LicenseError::MissingField("signed_with"))?;
        let provider = provider_for_tag(tag)?;
        Ok(provider.verify(&self.data_for_signature(), signature, public_key))
    }

    /// Copies every field, signature included, into a mutable draft.
    #[must_use]
    pub fn to_draft(&self) -> LicenseDraft {
        LicenseDraft {
            id: self.id.clone(),
            creation_date: self.creation_date,
            product_id: self.product_id.clone(),
            device_id: self.device_id.clone(),
            expiration_date: self.expiration_date,
            owner: self.owner.clone(),
            signed_with: self.signed_with.clone(),
            signature: self.signature.clone(),
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a license from JSON. Nothing is re-derived or re-signed.
    pub fn from_json(json: &str) -> LicenseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the license as UTF-8 JSON.
    pub fn save<W: Write>(&self, mut writer: W) -> LicenseResult<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a license written by [`License::save`].
    pub fn load<R: Read>(reader: R) -> LicenseResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn signed_fields(&self) -> SignedFields<'_> {
        SignedFields {
            id: self.id.as_deref(),
            creation_date: self.creation_date.as_ref(),
            product_id: self.product_id.as_deref(),
            device_id: self.device_id.as_deref(),
            expiration_date: self.expiration_date.as_ref(),
            owner: self.owner.as_deref(),
            signed_with: self.signed_with.as_deref(),
        }
    }
}

/// Mutable, unverified license fields.
///
/// Used by the builder while assembling a license and by callers that need
/// to derive a changed copy of an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseDraft {
    pub id: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub product_id: Option<String>,
    pub device_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub signed_with: Option<String>,
    pub signature: Option<Vec<u8>>,
}

impl LicenseDraft {
    /// Returns the canonical bytes the current field values would be signed over.
    #[must_use]
    pub fn data_for_signature(&self) -> Vec<u8> {
        canonical::encode(&SignedFields {
            id: self.id.as_deref(),
            creation_date: self.creation_date.as_ref(),
            product_id: self.product_id.as_deref(),
            device_id: self.device_id.as_deref(),
            expiration_date: self.expiration_date.as_ref(),
            owner: self.owner.as_deref(),
            signed_with: self.signed_with.as_deref(),
        })
    }

    /// Freezes the draft without signing it.
    ///
    /// Whatever signature the draft carries is kept verbatim; if any signed
    /// field changed since it was produced, validation will reject it.
    #[must_use]
    pub fn into_license(self) -> License {
        License {
            id: self.id,
            creation_date: self.creation_date,
            product_id: self.product_id,
            device_id: self.device_id,
            expiration_date: self.expiration_date,
            owner: self.owner,
            signed_with: self.signed_with,
            signature: self.signature,
        }
    }
}

mod signature_b64 {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| {
                STANDARD
                    .decode(s.trim())
                    .map_err(|e| D::Error::custom(format!("invalid signature base64: {e}")))
            })
            .transpose()
    }
}
