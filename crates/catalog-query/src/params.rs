//! Decoding of search request parameters.
//!
//! The presentation layer forwards the raw query-string values of a search
//! request. Filter values are decoded leniently: anything malformed is
//! dropped and the corresponding criterion is simply not applied, so bad
//! input can widen a result but never empty it. The sort key is decoded
//! strictly because there is no default order to fall back to.
//!
//! Params decoded with serde accept numbers, booleans and lists where a
//! string is expected, so `{"cdkver": 2}` reads like `cdkver=2`.

use serde::Deserialize;
use tracing::debug;

use crate::entry::Language;
use crate::error::{CatalogError, Result};
use crate::filter::FilterSpec;
use crate::lenient::{parse_major_version, RawValue};
use crate::ordering::SortKey;
use crate::query::CatalogQuery;

/// Query-string parameter names.
pub mod keys {
    pub const FRAMEWORK: &str = "cdk";
    pub const FRAMEWORK_MAJOR: &str = "cdkver";
    pub const KEYWORDS: &str = "keywords";
    pub const LANGUAGES: &str = "langs";
    pub const TAGS: &str = "tags";
    pub const SORT: &str = "sort";
}

/// Raw search parameters, one string per key. List values are comma
/// separated.
///
/// # Example
///
/// ```
/// use catalog_query::{Language, SearchParams, SortKey};
///
/// let params = SearchParams::from_pairs([
///     ("q", "lambda"),
///     ("cdk", "aws-cdk"),
///     ("cdkver", "two"),
///     ("langs", "python,klingon"),
///     ("sort", "downloadsDesc"),
/// ]);
///
/// let query = params.into_query().unwrap();
/// assert_eq!(query.sort(), SortKey::DownloadsDesc);
/// assert_eq!(query.filter().framework_major_version, None);
/// assert_eq!(query.filter().languages.len(), 1);
/// assert!(query.filter().languages.contains(&Language::Python));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSearchParams")]
pub struct SearchParams {
    pub cdk: Option<String>,
    pub cdkver: Option<String>,
    pub keywords: Option<String>,
    pub langs: Option<String>,
    pub tags: Option<String>,
    pub sort: Option<String>,
}

impl SearchParams {
    /// Builds params from key/value pairs, e.g. a parsed query string.
    ///
    /// Keys this crate does not handle (search text, offsets) are ignored.
    /// A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                keys::FRAMEWORK => &mut params.cdk,
                keys::FRAMEWORK_MAJOR => &mut params.cdkver,
                keys::KEYWORDS => &mut params.keywords,
                keys::LANGUAGES => &mut params.langs,
                keys::TAGS => &mut params.tags,
                keys::SORT => &mut params.sort,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    /// Decodes the filter criteria. Never fails.
    pub fn filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new();

        if let Some(name) = non_blank(self.cdk.as_deref()) {
            spec = spec.framework(name);
        }

        if let Some(major) = non_blank(self.cdkver.as_deref()).and_then(parse_major_version) {
            spec = spec.framework_major(major);
        }

        spec = spec.keywords(split_list(self.keywords.as_deref()));
        spec = spec.tags(split_list(self.tags.as_deref()));

        for raw in split_list(self.langs.as_deref()) {
            match raw.parse::<Language>() {
                Ok(language) => spec = spec.language(language),
                Err(err) => debug!(%err, "ignoring language filter value"),
            }
        }

        spec
    }

    /// Decodes the sort key.
    ///
    /// Fails with [`CatalogError::MissingSortKey`] when absent and
    /// [`CatalogError::UnknownSortKey`] when not recognized.
    pub fn sort_key(&self) -> Result<SortKey> {
        non_blank(self.sort.as_deref())
            .ok_or(CatalogError::MissingSortKey)?
            .parse()
    }

    /// Decodes both filter and sort into a query.
    pub fn into_query(self) -> Result<CatalogQuery> {
        let sort = self.sort_key()?;
        Ok(CatalogQuery::with_filter(self.filter_spec(), sort))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearchParams {
    cdk: Option<RawValue>,
    cdkver: Option<RawValue>,
    keywords: Option<RawValue>,
    langs: Option<RawValue>,
    tags: Option<RawValue>,
    sort: Option<RawValue>,
}

impl From<RawSearchParams> for SearchParams {
    fn from(raw: RawSearchParams) -> Self {
        SearchParams {
            cdk: raw.cdk.and_then(RawValue::into_param),
            cdkver: raw.cdkver.and_then(RawValue::into_param),
            keywords: raw.keywords.and_then(RawValue::into_param),
            langs: raw.langs.and_then(RawValue::into_param),
            tags: raw.tags.and_then(RawValue::into_param),
            sort: raw.sort.and_then(RawValue::into_param),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_give_empty_spec() {
        let params = SearchParams::default();
        assert!(params.filter_spec().is_empty());
        assert!(matches!(params.sort_key(), Err(CatalogError::MissingSortKey)));
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let params = SearchParams::from_pairs([("q", "s3"), ("offset", "20"), ("cdk", "cdk8s")]);
        assert_eq!(params.cdk.as_deref(), Some("cdk8s"));
        assert_eq!(params.filter_spec(), FilterSpec::new().framework("cdk8s"));
    }

    #[test]
    fn from_pairs_last_value_wins() {
        let params = SearchParams::from_pairs([("sort", "nameAsc"), ("sort", "nameDesc")]);
        assert_eq!(params.sort_key().unwrap(), SortKey::NameDesc);
    }

    #[test]
    fn framework_major_parsing() {
        let valid = SearchParams::from_pairs([("cdkver", " 2 ")]);
        assert_eq!(valid.filter_spec().framework_major_version, Some(2));

        for bad in ["two", "2.5", "2e1", ""] {
            let params = SearchParams::from_pairs([("cdkver", bad)]);
            assert_eq!(params.filter_spec().framework_major_version, None, "{bad}");
        }
    }

    #[test]
    fn integer_majors_no_framework_has_still_filter() {
        let negative = SearchParams::from_pairs([("cdkver", "-1")]);
        assert_eq!(negative.filter_spec().framework_major_version, Some(-1));
        assert_eq!(negative.filter_spec().compile().len(), 1);

        let huge = SearchParams::from_pairs([("cdkver", "4294967296")]);
        assert_eq!(huge.filter_spec().framework_major_version, Some(4_294_967_296));
    }

    #[test]
    fn blank_framework_is_absent() {
        let params = SearchParams::from_pairs([("cdk", "   ")]);
        assert!(params.filter_spec().framework_name.is_none());
    }

    #[test]
    fn lists_split_on_commas() {
        let params = SearchParams::from_pairs([
            ("keywords", "aws, lambda,,s3 "),
            ("tags", "official"),
        ]);
        let spec = params.filter_spec();
        assert_eq!(spec.keywords.len(), 3);
        assert!(spec.keywords.contains("s3"));
        assert!(spec.package_tag_ids.contains("official"));
    }

    #[test]
    fn unknown_languages_dropped() {
        let params = SearchParams::from_pairs([("langs", "klingon,elvish")]);
        let spec = params.filter_spec();
        assert!(spec.languages.is_empty());
        assert!(spec.compile().is_empty());
    }

    #[test]
    fn unknown_sort_is_an_error() {
        let params = SearchParams::from_pairs([("sort", "relevance")]);
        assert!(matches!(
            params.into_query(),
            Err(CatalogError::UnknownSortKey(key)) if key == "relevance"
        ));
    }

    #[test]
    fn deserializes_numbers_and_lists_as_params() {
        let params: SearchParams = serde_json::from_str(
            r#"{"cdk": "aws-cdk", "cdkver": 2, "langs": ["python", "klingon"],
                "tags": {"bad": true}, "sort": "nameAsc"}"#,
        )
        .unwrap();
        assert_eq!(params.cdkver.as_deref(), Some("2"));
        assert_eq!(params.tags, None);

        let query = params.into_query().unwrap();
        assert_eq!(query.filter().framework_major_version, Some(2));
        assert_eq!(query.filter().languages.len(), 1);
        assert!(query.filter().package_tag_ids.is_empty());
    }

    #[test]
    fn deserializes_from_json_object() {
        let params: SearchParams =
            serde_json::from_str(r#"{"cdk": "aws-cdk", "sort": "nameAsc"}"#).unwrap();
        let query = params.into_query().unwrap();
        assert_eq!(query.sort(), SortKey::NameAsc);
        assert_eq!(query.filter().framework_name.as_deref(), Some("aws-cdk"));
    }
}
