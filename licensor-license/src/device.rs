//! Device identifiers for license binding.
//!
//! Produces a stable id for the current machine from its hostname and OS
//! version. Licenses only ever compare this value; they never interpret it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;

/// Information about the current device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Operating system name.
    pub os_name: String,
    /// Operating system version.
    pub os_version: String,
    /// Hostname.
    pub hostname: String,
}

impl DeviceInfo {
    /// Collects information about the current device.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            os_name: env::consts::OS.to_string(),
            os_version: get_os_version(),
            hostname: get_hostname(),
        }
    }
}

/// An opaque, stable identifier for one device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Returns the id of the current device.
    #[must_use]
    pub fn current() -> Self {
        Self::from_info(&DeviceInfo::collect())
    }

    /// Derives the id for a described device.
    #[must_use]
    pub fn from_info(info: &DeviceInfo) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(info.hostname.as_bytes());
        hasher.update(b"|");
        hasher.update(info.os_name.as_bytes());
        hasher.update(b"|");
        hasher.update(info.os_version.as_bytes());
        let hash = hasher.finalize();

        Self(URL_SAFE_NO_PAD.encode(&hash[..16]))
    }

    /// Returns the id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

const UNKNOWN: &str = "unknown";

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(target_os = "linux")]
fn get_os_version() -> String {
    std::fs::read_to_string("/etc/os-release")
        .ok()
        .and_then(|release| os_release_version(&release))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(target_os = "macos")]
fn get_os_version() -> String {
    std::process::Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn get_os_version() -> String {
    UNKNOWN.to_string()
}

/// Extracts `VERSION_ID` from an os-release file.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn os_release_version(release: &str) -> Option<String> {
    release.lines().find_map(|line| {
        let value = line.strip_prefix("VERSION_ID=")?.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}
