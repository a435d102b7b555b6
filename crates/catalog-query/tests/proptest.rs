//! Property-based tests for the query engine using proptest.

use std::cmp::Ordering;

use catalog_query::{execute, CatalogEntry, FilterSpec, Language, SortKey};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::sample::select;

// ============================================================================
// Test helpers
// ============================================================================

// 2023-05-01T00:00:00Z
const BASE_SECS: i64 = 1_682_899_200;

const VERSIONS: &[&str] = &[
    "1.0.0",
    "1.0.0-rc.1",
    "1.2.0",
    "1.10.0",
    "2.0.0+build.7",
    "1.0",
    "legacy",
];
const KEYWORDS: &[&str] = &["aws", "k8s", "security"];
const FRAMEWORKS: &[&str] = &["aws-cdk", "cdk8s"];
const TAGS: &[&str] = &["official", "community", "partner"];

fn language_strategy() -> impl Strategy<Value = Language> {
    select(Language::ALL.to_vec())
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    select(SortKey::ALL.to_vec())
}

// Small value pools so that ties on every sort field are common.
fn entry_strategy() -> impl Strategy<Value = CatalogEntry> {
    (
        "[a-cA-C]{1,3}",
        select(VERSIONS),
        0i64..(4 * 86_400),
        0u64..4,
        prop::collection::btree_set(language_strategy(), 0..3),
        prop::collection::btree_set(select(KEYWORDS), 0..3),
        prop::option::of((select(FRAMEWORKS), 1u32..3)),
        prop::collection::btree_set(select(TAGS), 0..3),
    )
        .prop_map(
            |(name, version, offset, downloads, languages, keywords, framework, tags)| {
                let date = Utc.timestamp_opt(BASE_SECS + offset, 0).unwrap();
                let entry = CatalogEntry::new(name, version, date)
                    .unwrap()
                    .with_downloads(downloads)
                    .with_languages(languages)
                    .with_keywords(keywords)
                    .with_tags(tags);
                match framework {
                    Some((name, major)) => entry.with_framework(name, major),
                    None => entry,
                }
            },
        )
}

fn entries_strategy() -> impl Strategy<Value = Vec<CatalogEntry>> {
    prop::collection::vec(entry_strategy(), 0..40)
}

fn filter_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of(select(FRAMEWORKS)),
        prop::option::of(1i64..3),
        prop::collection::btree_set(select(KEYWORDS), 0..2),
        prop::collection::btree_set(language_strategy(), 0..3),
        prop::collection::btree_set(select(TAGS), 0..2),
    )
        .prop_map(|(framework, major, keywords, languages, tags)| FilterSpec {
            framework_name: framework.map(String::from),
            framework_major_version: major,
            keywords: keywords.into_iter().map(String::from).collect(),
            languages,
            package_tag_ids: tags.into_iter().map(String::from).collect(),
        })
}

/// Constrains every dimension `base` leaves open with the value from `extra`.
fn narrow(base: &FilterSpec, extra: &FilterSpec) -> FilterSpec {
    let mut narrowed = base.clone();
    if narrowed.framework_name.is_none() {
        narrowed.framework_name = extra.framework_name.clone();
    }
    if narrowed.framework_major_version.is_none() {
        narrowed.framework_major_version = extra.framework_major_version;
    }
    if narrowed.keywords.is_empty() {
        narrowed.keywords = extra.keywords.clone();
    }
    if narrowed.languages.is_empty() {
        narrowed.languages = extra.languages.clone();
    }
    if narrowed.package_tag_ids.is_empty() {
        narrowed.package_tag_ids = extra.package_tag_ids.clone();
    }
    narrowed
}

fn contains_ref(haystack: &[&CatalogEntry], needle: &CatalogEntry) -> bool {
    haystack.iter().any(|e| std::ptr::eq(*e, needle))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The result never holds more entries than the input.
    #[test]
    fn execute_never_grows_collection(
        entries in entries_strategy(),
        filter in filter_strategy(),
        sort in sort_key_strategy(),
    ) {
        let results = execute(&entries, &filter, sort);
        prop_assert!(results.len() <= entries.len());
    }

    /// Every returned entry satisfies the filter and every skipped one fails it.
    #[test]
    fn result_is_exactly_the_matching_set(
        entries in entries_strategy(),
        filter in filter_strategy(),
        sort in sort_key_strategy(),
    ) {
        let results = execute(&entries, &filter, sort);
        for entry in &entries {
            prop_assert_eq!(filter.matches(entry), contains_ref(&results, entry));
        }
    }

    /// Filtering a filtered result changes nothing.
    #[test]
    fn filtering_is_idempotent(
        entries in entries_strategy(),
        filter in filter_strategy(),
        sort in sort_key_strategy(),
    ) {
        let once: Vec<CatalogEntry> = execute(&entries, &filter, sort)
            .into_iter()
            .cloned()
            .collect();
        let twice = execute(&once, &filter, sort);

        prop_assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice) {
            prop_assert_eq!(a, b);
        }
    }

    /// Constraining more dimensions can only shrink the result.
    #[test]
    fn narrowing_filter_yields_subset(
        entries in entries_strategy(),
        base in filter_strategy(),
        extra in filter_strategy(),
    ) {
        let narrowed = narrow(&base, &extra);
        let wide = execute(&entries, &base, SortKey::NameAsc);
        let narrow = execute(&entries, &narrowed, SortKey::NameAsc);

        prop_assert!(narrow.len() <= wide.len());
        for entry in narrow {
            prop_assert!(contains_ref(&wide, entry));
        }
    }

    /// An empty spec keeps every entry.
    #[test]
    fn empty_filter_keeps_everything(
        entries in entries_strategy(),
        sort in sort_key_strategy(),
    ) {
        let results = execute(&entries, &FilterSpec::new(), sort);
        prop_assert_eq!(results.len(), entries.len());
        for entry in &entries {
            prop_assert!(contains_ref(&results, entry));
        }
    }

    /// A language filter naming the native language constrains nothing.
    #[test]
    fn native_language_passes_through(
        entries in entries_strategy(),
        others in prop::collection::btree_set(language_strategy(), 0..4),
    ) {
        let filter = FilterSpec::new()
            .language(Language::NATIVE)
            .languages(others);
        prop_assert!(filter.compile().is_empty());
        prop_assert_eq!(execute(&entries, &filter, SortKey::NameAsc).len(), entries.len());
    }

    /// Results are ordered under the requested comparator.
    #[test]
    fn results_are_sorted(
        entries in entries_strategy(),
        filter in filter_strategy(),
        sort in sort_key_strategy(),
    ) {
        let results = execute(&entries, &filter, sort);
        for pair in results.windows(2) {
            prop_assert_ne!(sort.compare(pair[0], pair[1]), Ordering::Greater);
        }
    }

    /// Input order does not affect the result beyond full ties.
    #[test]
    fn sort_is_deterministic(
        entries in entries_strategy(),
        sort in sort_key_strategy(),
    ) {
        let mut reversed = entries.clone();
        reversed.reverse();

        let forward = execute(&entries, &FilterSpec::new(), sort);
        let backward = execute(&reversed, &FilterSpec::new(), sort);
        let again = execute(&entries, &FilterSpec::new(), sort);

        for (a, b) in forward.iter().zip(&backward) {
            prop_assert_eq!(sort.compare(a, b), Ordering::Equal);
        }
        for (a, b) in forward.iter().zip(&again) {
            prop_assert!(std::ptr::eq(*a, *b));
        }
    }

    /// Comparators are antisymmetric and transitive.
    #[test]
    fn comparators_are_strict_weak_orders(
        entries in prop::collection::vec(entry_strategy(), 0..10),
        sort in sort_key_strategy(),
    ) {
        for a in &entries {
            prop_assert_eq!(sort.compare(a, a), Ordering::Equal);
            for b in &entries {
                let ab = sort.compare(a, b);
                prop_assert_eq!(ab, sort.compare(b, a).reverse());
                for c in &entries {
                    let bc = sort.compare(b, c);
                    if ab == Ordering::Less && bc == Ordering::Less {
                        prop_assert_eq!(sort.compare(a, c), Ordering::Less);
                    }
                    if ab == Ordering::Equal && bc == Ordering::Equal {
                        prop_assert_eq!(sort.compare(a, c), Ordering::Equal);
                    }
                }
            }
        }
    }
}
