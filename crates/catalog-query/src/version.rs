//! Package versions ordered by semantic-version precedence.
//!
//! Catalog data contains legacy versions that are not valid semver. Those
//! are kept verbatim and given a stable fallback position instead of being
//! rejected.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// A version string as published, plus its parsed form when it is semver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PackageVersion {
    raw: String,
    parsed: Option<Version>,
}

impl PackageVersion {
    /// Wraps a version string, parsing it as semver when possible.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = Version::parse(raw.trim()).ok();
        PackageVersion { raw, parsed }
    }

    /// Returns the version exactly as published.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed semver, if the raw string is valid semver.
    pub fn semver(&self) -> Option<&Version> {
        self.parsed.as_ref()
    }

    /// Returns `true` if the raw string parsed as semver.
    pub fn is_semver(&self) -> bool {
        self.parsed.is_some()
    }

    /// Compares two versions by precedence.
    ///
    /// Valid versions compare by major, minor, patch and pre-release;
    /// build metadata is ignored. Unparseable versions sort after every
    /// valid one and compare among themselves by raw string.
    pub fn precedence(&self, other: &PackageVersion) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a.cmp_precedence(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for PackageVersion {
    fn from(raw: String) -> Self {
        PackageVersion::parse(raw)
    }
}

impl From<&str> for PackageVersion {
    fn from(raw: &str) -> Self {
        PackageVersion::parse(raw)
    }
}

impl From<PackageVersion> for String {
    fn from(version: PackageVersion) -> Self {
        version.raw
    }
}
