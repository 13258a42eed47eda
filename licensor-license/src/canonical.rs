//! Canonical byte encoding of a license's signed fields.
//!
//! The encoding is a list of `Name: value` fragments joined by `", "`, in
//! the fixed order Id, CreationDate, ProductId, DeviceId, ExpirationDate,
//! Owner, SignedWith. Absent fields are skipped. Values have `\` and `,`
//! backslash-escaped, so every unescaped comma in the output is a
//! separator and no value can forge an extra fragment.
//!
//! The bytes are recomputed from the fields on every sign and verify; they
//! are never stored.

use chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;

const SEPARATOR: &str = ", ";

/// Borrowed view of every signed field.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SignedFields<'a> {
    pub id: Option<&'a str>,
    pub creation_date: Option<&'a DateTime<Utc>>,
    pub product_id: Option<&'a str>,
    pub device_id: Option<&'a str>,
    pub expiration_date: Option<&'a DateTime<Utc>>,
    pub owner: Option<&'a str>,
    pub signed_with: Option<&'a str>,
}

/// Renders a timestamp the way it is signed: RFC 3339, nanoseconds, `Z`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn encode(fields: &SignedFields<'_>) -> Vec<u8> {
    let creation_date = fields.creation_date.map(format_timestamp);
    let expiration_date = fields.expiration_date.map(format_timestamp);

    let fragments = [
        ("Id", fields.id),
        ("CreationDate", creation_date.as_deref()),
        ("ProductId", fields.product_id),
        ("DeviceId", fields.device_id),
        ("ExpirationDate", expiration_date.as_deref()),
        ("Owner", fields.owner),
        ("SignedWith", fields.signed_with),
    ];

    let mut out = String::new();
    for (name, value) in fragments {
        let Some(value) = value else { continue };
        if !out.is_empty() {
            out.push_str(SEPARATOR);
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(&escape(value));
    }
    out.into_bytes()
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', ',']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if matches!(c, '\\' | ',') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
