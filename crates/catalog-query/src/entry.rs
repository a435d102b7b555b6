//! Catalog entry types.
//!
//! A [`CatalogEntry`] is one published package version. Entries are built
//! once by whoever loads the catalog and are read-only afterwards: fields are
//! private and only the consuming `with_*` builders can set them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::collate::CollationKey;
use crate::error::{CatalogError, Result};
use crate::version::PackageVersion;

/// Target language a package can be consumed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "csharp", alias = "dotnet")]
    DotNet,
    #[serde(rename = "go")]
    Go,
}

impl Language {
    /// The registry's authoring language. Every package is usable from it.
    pub const NATIVE: Language = Language::TypeScript;

    /// All supported languages.
    pub const ALL: [Language; 5] = [
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::DotNet,
        Language::Go,
    ];

    /// Returns the wire identifier of this language.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::DotNet => "csharp",
            Language::Go => "go",
        }
    }

    /// Returns `true` for the authoring language.
    pub fn is_native(self) -> bool {
        self == Language::NATIVE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" => Ok(Language::TypeScript),
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "csharp" | "dotnet" => Ok(Language::DotNet),
            "go" => Ok(Language::Go),
            _ => Err(CatalogError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Construct framework a package targets, e.g. `aws-cdk` major 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructFramework {
    pub name: String,
    pub major_version: u32,
}

impl ConstructFramework {
    pub fn new(name: impl Into<String>, major_version: u32) -> Self {
        ConstructFramework {
            name: name.into(),
            major_version,
        }
    }
}

/// One published package snapshot.
///
/// # Example
///
/// ```
/// use catalog_query::{CatalogEntry, Language};
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
/// let entry = CatalogEntry::new("cdk-nag", "2.27.0", date)
///     .unwrap()
///     .with_downloads(1200)
///     .with_language(Language::Python)
///     .with_framework("aws-cdk", 2);
///
/// assert!(entry.supports_language(Language::Python));
/// assert!(entry.supports_language(Language::TypeScript));
/// assert!(!entry.supports_language(Language::Go));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "crate::catalog::RawPackage")]
pub struct CatalogEntry {
    collation: CollationKey,
    version: PackageVersion,
    description: Option<String>,
    download_count: u64,
    publish_date: DateTime<Utc>,
    supported_languages: BTreeSet<Language>,
    keywords: BTreeSet<String>,
    framework: Option<ConstructFramework>,
    package_tag_ids: BTreeSet<String>,
}

impl CatalogEntry {
    /// Creates an entry with no downloads, languages, keywords, framework or
    /// tags.
    ///
    /// Fails if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<PackageVersion>,
        publish_date: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::InvalidEntry(
                "package name must not be empty".to_string(),
            ));
        }

        Ok(CatalogEntry {
            collation: CollationKey::new(&name),
            version: version.into(),
            description: None,
            download_count: 0,
            publish_date,
            supported_languages: BTreeSet::new(),
            keywords: BTreeSet::new(),
            framework: None,
            package_tag_ids: BTreeSet::new(),
        })
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_downloads(mut self, download_count: u64) -> Self {
        self.download_count = download_count;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.supported_languages.insert(language);
        self
    }

    pub fn with_languages<I>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = Language>,
    {
        self.supported_languages.extend(languages);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_framework(mut self, name: impl Into<String>, major_version: u32) -> Self {
        self.framework = Some(ConstructFramework::new(name, major_version));
        self
    }

    pub fn with_tag(mut self, tag_id: impl Into<String>) -> Self {
        self.package_tag_ids.insert(tag_id.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_tag_ids
            .extend(tag_ids.into_iter().map(Into::into));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        self.collation.as_str()
    }

    pub fn version(&self) -> &PackageVersion {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn download_count(&self) -> u64 {
        self.download_count
    }

    pub fn publish_date(&self) -> DateTime<Utc> {
        self.publish_date
    }

    /// Calendar day of publication in UTC.
    pub fn publish_day(&self) -> NaiveDate {
        self.publish_date.date_naive()
    }

    /// Languages explicitly listed for this package.
    ///
    /// The native language is implied and may be missing here; use
    /// [`supports_language`](Self::supports_language) to account for it.
    pub fn supported_languages(&self) -> &BTreeSet<Language> {
        &self.supported_languages
    }

    /// Returns `true` if the package is usable from `language`.
    pub fn supports_language(&self, language: Language) -> bool {
        language.is_native() || self.supported_languages.contains(&language)
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn framework(&self) -> Option<&ConstructFramework> {
        self.framework.as_ref()
    }

    pub fn package_tag_ids(&self) -> &BTreeSet<String> {
        &self.package_tag_ids
    }

    pub(crate) fn collation_key(&self) -> &CollationKey {
        &self.collation
    }
}
