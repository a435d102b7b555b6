//! Query execution.
//!
//! [`execute`] is the engine's single entry point: filter, then sort. The
//! [`CatalogQuery`] builder bundles a filter spec and a sort key for callers
//! that pass queries around.

use tracing::debug;

use crate::entry::{CatalogEntry, Language};
use crate::filter::FilterSpec;
use crate::ordering::SortKey;

/// Selects the entries matching `filter` and orders them by `sort`.
///
/// The input is never modified. The result borrows from it, holds exactly
/// the matching entries and is not truncated; paging is left to the caller.
/// Entries the comparator considers equal keep their input order.
///
/// # Example
///
/// ```
/// use catalog_query::{execute, CatalogEntry, FilterSpec, SortKey};
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
/// let entries = vec![
///     CatalogEntry::new("b", "1.0.0", date).unwrap().with_framework("aws-cdk", 2),
///     CatalogEntry::new("a", "1.0.0", date).unwrap().with_framework("aws-cdk", 1),
///     CatalogEntry::new("c", "1.0.0", date).unwrap().with_framework("aws-cdk", 2),
/// ];
///
/// let filter = FilterSpec::new().framework_major(2);
/// let results = execute(&entries, &filter, SortKey::NameDesc);
///
/// let names: Vec<_> = results.iter().map(|e| e.name()).collect();
/// assert_eq!(names, ["c", "b"]);
/// ```
pub fn execute<'a>(
    entries: &'a [CatalogEntry],
    filter: &FilterSpec,
    sort: SortKey,
) -> Vec<&'a CatalogEntry> {
    let compiled = filter.compile();

    let mut results: Vec<&'a CatalogEntry> = if compiled.is_empty() {
        entries.iter().collect()
    } else {
        entries
            .iter()
            .filter(|entry| compiled.matches(entry))
            .collect()
    };

    results.sort_by(|a, b| sort.compare(a, b));

    debug!(
        candidates = entries.len(),
        criteria = compiled.len(),
        matched = results.len(),
        sort = %sort,
        "executed catalog query"
    );

    results
}

/// A filter spec paired with a sort key.
///
/// # Example
///
/// ```
/// use catalog_query::{CatalogQuery, Language, SortKey};
///
/// let query = CatalogQuery::new(SortKey::DownloadsDesc)
///     .framework("aws-cdk")
///     .language(Language::Python);
///
/// assert_eq!(query.sort(), SortKey::DownloadsDesc);
/// assert_eq!(query.filter().framework_name.as_deref(), Some("aws-cdk"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    filter: FilterSpec,
    sort: SortKey,
}

impl CatalogQuery {
    /// Creates a query with no filter criteria.
    pub fn new(sort: SortKey) -> Self {
        CatalogQuery {
            filter: FilterSpec::new(),
            sort,
        }
    }

    /// Creates a query from an existing filter spec.
    pub fn with_filter(filter: FilterSpec, sort: SortKey) -> Self {
        CatalogQuery { filter, sort }
    }

    // ========================================================================
    // Filter builders
    // ========================================================================

    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.filter = self.filter.framework(name);
        self
    }

    pub fn framework_major(mut self, major_version: i64) -> Self {
        self.filter = self.filter.framework_major(major_version);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.filter = self.filter.keyword(keyword);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.filter = self.filter.language(language);
        self
    }

    pub fn tag(mut self, tag_id: impl Into<String>) -> Self {
        self.filter = self.filter.tag(tag_id);
        self
    }

    /// Replaces the sort key.
    pub fn order_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the query. See [`execute`].
    pub fn execute<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        execute(entries, &self.filter, self.sort)
    }

    /// Runs the query and clones the results.
    pub fn execute_cloned(&self, entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
        self.execute(entries).into_iter().cloned().collect()
    }

    /// Tests if a single entry passes the filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.filter.matches(entry)
    }

    /// Counts matching entries without sorting.
    pub fn count(&self, entries: &[CatalogEntry]) -> usize {
        let compiled = self.filter.compile();
        entries.iter().filter(|entry| compiled.matches(entry)).count()
    }

    /// Returns `true` if any entry matches.
    pub fn any(&self, entries: &[CatalogEntry]) -> bool {
        let compiled = self.filter.compile();
        entries.iter().any(|entry| compiled.matches(entry))
    }
}
