//! Filter specifications and their compiled predicates.
//!
//! A [`FilterSpec`] holds optional criteria. Compiling it produces a
//! [`CompiledFilter`]: the list of [`Criterion`] values that are actually
//! set. Unset criteria are left out rather than compiled to a trivially true
//! check, so an empty spec compiles to an empty list and matches everything.
//!
//! ```text
//! match = criterion_1 ∧ criterion_2 ∧ ... ∧ criterion_n
//! ```
//!
//! Multi-valued criteria (keywords, languages, tags) match when the entry
//! shares at least one value with the requested set.
//!
//! Decoding a spec never fails on a criterion value: one of the wrong type,
//! an unknown language id or a non-integer major version leaves that
//! criterion unset.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::{CatalogEntry, Language};
use crate::lenient::RawValue;

/// Optional filter criteria for a catalog query.
///
/// # Example
///
/// ```
/// use catalog_query::{FilterSpec, Language};
///
/// let spec = FilterSpec::new()
///     .framework("aws-cdk")
///     .framework_major(2)
///     .language(Language::Python)
///     .keyword("security");
///
/// assert_eq!(spec.compile().len(), 4);
/// assert!(FilterSpec::new().compile().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFilterSpec")]
pub struct FilterSpec {
    /// Exact construct framework name.
    pub framework_name: Option<String>,
    /// Exact construct framework major version. Any integer is accepted;
    /// one no framework has simply matches nothing.
    pub framework_major_version: Option<i64>,
    /// Publisher keywords; match any.
    pub keywords: BTreeSet<String>,
    /// Target languages; match any, with native-language pass-through.
    pub languages: BTreeSet<Language>,
    /// Curated tag ids; match any.
    pub package_tag_ids: BTreeSet<String>,
}

impl FilterSpec {
    /// Creates an empty spec, which matches every entry.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.framework_name = Some(name.into());
        self
    }

    pub fn framework_major(mut self, major_version: i64) -> Self {
        self.framework_major_version = Some(major_version);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.languages.insert(language);
        self
    }

    pub fn languages<I>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = Language>,
    {
        self.languages.extend(languages);
        self
    }

    pub fn tag(mut self, tag_id: impl Into<String>) -> Self {
        self.package_tag_ids.insert(tag_id.into());
        self
    }

    pub fn tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_tag_ids
            .extend(tag_ids.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if no criterion is set.
    ///
    /// A spec can be non-empty and still compile to nothing, e.g. when the
    /// only criterion is the native language.
    pub fn is_empty(&self) -> bool {
        self.framework_name.is_none()
            && self.framework_major_version.is_none()
            && self.keywords.is_empty()
            && self.languages.is_empty()
            && self.package_tag_ids.is_empty()
    }

    /// Compiles the spec into the criteria that constrain entries.
    pub fn compile(&self) -> CompiledFilter {
        let criteria = [
            framework_name_criterion(self.framework_name.as_deref()),
            self.framework_major_version
                .map(Criterion::FrameworkMajorVersion),
            set_criterion(&self.keywords, Criterion::Keywords),
            languages_criterion(&self.languages),
            set_criterion(&self.package_tag_ids, Criterion::PackageTags),
        ];

        CompiledFilter {
            criteria: criteria.into_iter().flatten().collect(),
        }
    }

    /// Tests a single entry. Compiles on every call; prefer
    /// [`compile`](Self::compile) when testing many entries.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.compile().matches(entry)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFilterSpec {
    framework_name: Option<RawValue>,
    framework_major_version: Option<RawValue>,
    keywords: Option<RawValue>,
    languages: Option<RawValue>,
    package_tag_ids: Option<RawValue>,
}

impl From<RawFilterSpec> for FilterSpec {
    fn from(raw: RawFilterSpec) -> Self {
        FilterSpec {
            framework_name: raw.framework_name.and_then(RawValue::into_text),
            framework_major_version: raw.framework_major_version.and_then(RawValue::into_major),
            keywords: raw
                .keywords
                .map(RawValue::into_strings)
                .unwrap_or_default()
                .into_iter()
                .collect(),
            languages: raw
                .languages
                .map(RawValue::into_languages)
                .unwrap_or_default()
                .into_iter()
                .collect(),
            package_tag_ids: raw
                .package_tag_ids
                .map(RawValue::into_strings)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }
}

fn framework_name_criterion(name: Option<&str>) -> Option<Criterion> {
    name.filter(|name| !name.is_empty())
        .map(|name| Criterion::FrameworkName(name.to_string()))
}

fn set_criterion(
    values: &BTreeSet<String>,
    build: fn(BTreeSet<String>) -> Criterion,
) -> Option<Criterion> {
    if values.is_empty() {
        None
    } else {
        Some(build(values.clone()))
    }
}

// The native language is supported by every package, so asking for it
// cannot narrow the result.
fn languages_criterion(languages: &BTreeSet<Language>) -> Option<Criterion> {
    if languages.is_empty() || languages.contains(&Language::NATIVE) {
        None
    } else {
        Some(Criterion::Languages(languages.clone()))
    }
}

/// Filter dimension a [`Criterion`] constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    FrameworkName,
    FrameworkMajorVersion,
    Keywords,
    Languages,
    PackageTags,
}

impl FilterField {
    /// Returns the display name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::FrameworkName => "frameworkName",
            FilterField::FrameworkMajorVersion => "frameworkMajorVersion",
            FilterField::Keywords => "keywords",
            FilterField::Languages => "languages",
            FilterField::PackageTags => "packageTagIds",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single active filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Framework name equals the value.
    FrameworkName(String),
    /// Framework major version equals the value.
    FrameworkMajorVersion(i64),
    /// Entry keywords intersect the set.
    Keywords(BTreeSet<String>),
    /// Entry languages intersect the set. Never holds the native language.
    Languages(BTreeSet<Language>),
    /// Entry tag ids intersect the set.
    PackageTags(BTreeSet<String>),
}

impl Criterion {
    /// Evaluates this criterion against an entry.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Criterion::FrameworkName(name) => entry
                .framework()
                .is_some_and(|framework| &framework.name == name),
            Criterion::FrameworkMajorVersion(major) => entry
                .framework()
                .is_some_and(|framework| i64::from(framework.major_version) == *major),
            Criterion::Keywords(keywords) => !entry.keywords().is_disjoint(keywords),
            Criterion::Languages(languages) => {
                !entry.supported_languages().is_disjoint(languages)
            }
            Criterion::PackageTags(tags) => !entry.package_tag_ids().is_disjoint(tags),
        }
    }

    pub fn field(&self) -> FilterField {
        match self {
            Criterion::FrameworkName(_) => FilterField::FrameworkName,
            Criterion::FrameworkMajorVersion(_) => FilterField::FrameworkMajorVersion,
            Criterion::Keywords(_) => FilterField::Keywords,
            Criterion::Languages(_) => FilterField::Languages,
            Criterion::PackageTags(_) => FilterField::PackageTags,
        }
    }
}

/// Conjunction of the active criteria of a [`FilterSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    criteria: Vec<Criterion>,
}

impl CompiledFilter {
    /// Returns `true` if every criterion holds for the entry.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(entry))
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns `true` if the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }
}
