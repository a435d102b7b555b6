//! Decoding of registry catalog documents.
//!
//! The registry publishes its full listing as a single JSON document:
//!
//! ```text
//! {
//!   "packages": [
//!     {
//!       "name": "cdk-nag",
//!       "version": "2.27.0",
//!       "description": "...",
//!       "keywords": ["aws-cdk", "security"],
//!       "languages": { "python": { ... }, "java": { ... } },
//!       "downloads": 1200,
//!       "metadata": {
//!         "date": "2023-05-01T10:00:00.000Z",
//!         "constructFramework": { "name": "aws-cdk", "majorVersion": 2 },
//!         "packageTags": [{ "id": "official" }]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Fetching the document is the caller's job; this module only decodes it.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::entry::{CatalogEntry, Language};
use crate::error::{CatalogError, Result};
use crate::query::CatalogQuery;

/// A decoded catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    packages: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps already-built entries.
    pub fn new(packages: Vec<CatalogEntry>) -> Self {
        Catalog { packages }
    }

    /// Decodes a catalog document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        debug!(packages = catalog.len(), "decoded catalog document");
        Ok(catalog)
    }

    /// Decodes a catalog document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        debug!(packages = catalog.len(), "decoded catalog document");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Runs a query over the catalog's entries.
    pub fn query(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        query.execute(&self.packages)
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.packages
    }
}

/// Wire shape of one catalog package.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackage {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    // Values hold per-language target configuration we do not need.
    #[serde(default)]
    languages: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    downloads: u64,
    metadata: RawMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    date: DateTime<Utc>,
    #[serde(default)]
    construct_framework: Option<RawFramework>,
    #[serde(default)]
    package_tags: Vec<RawPackageTag>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFramework {
    name: String,
    #[serde(default)]
    major_version: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawPackageTag {
    id: String,
}

impl TryFrom<RawPackage> for CatalogEntry {
    type Error = CatalogError;

    fn try_from(raw: RawPackage) -> Result<Self> {
        let mut entry = CatalogEntry::new(raw.name, raw.version, raw.metadata.date)?
            .with_downloads(raw.downloads)
            .with_keywords(raw.keywords)
            .with_tags(raw.metadata.package_tags.into_iter().map(|tag| tag.id));

        // Languages outside the supported set are skipped.
        for id in raw.languages.keys() {
            if let Ok(language) = id.parse::<Language>() {
                entry = entry.with_language(language);
            }
        }

        // Name and major version travel together; a framework without a
        // major version is dropped.
        if let Some(RawFramework {
            name,
            major_version: Some(major),
        }) = raw.metadata.construct_framework
        {
            entry = entry.with_framework(name, major);
        }

        if let Some(description) = raw.description {
            entry = entry.with_description(description);
        }

        Ok(entry)
    }
}
