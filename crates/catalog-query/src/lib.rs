//! Catalog query engine for a package registry browser.
//!
//! Given catalog entries already loaded in memory, a [`FilterSpec`] and a
//! [`SortKey`], the engine selects the matching entries and orders them
//! deterministically. It does no I/O, no full-text search and no paging.
//!
//! # Quick Start
//!
//! ```rust
//! use catalog_query::{execute, CatalogEntry, FilterSpec, Language, SortKey};
//! use chrono::{TimeZone, Utc};
//!
//! let day = |d| Utc.with_ymd_and_hms(2023, 5, d, 12, 0, 0).unwrap();
//!
//! let entries = vec![
//!     CatalogEntry::new("cdk-nag", "2.27.0", day(1)).unwrap()
//!         .with_downloads(1200)
//!         .with_framework("aws-cdk", 2)
//!         .with_language(Language::Python),
//!     CatalogEntry::new("cdk8s-plus-27", "2.7.0", day(2)).unwrap()
//!         .with_downloads(300)
//!         .with_framework("cdk8s", 2),
//!     CatalogEntry::new("aws-cdk-lib", "2.80.0", day(3)).unwrap()
//!         .with_downloads(90000)
//!         .with_framework("aws-cdk", 2)
//!         .with_languages([Language::Python, Language::Java]),
//! ];
//!
//! let filter = FilterSpec::new()
//!     .framework("aws-cdk")
//!     .language(Language::Python);
//!
//! let results = execute(&entries, &filter, SortKey::DownloadsDesc);
//! let names: Vec<_> = results.iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["aws-cdk-lib", "cdk-nag"]);
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! match = (framework name equal, if set)
//!       ∧ (framework major equal, if set)
//!       ∧ (any keyword shared, if set)
//!       ∧ (any language shared, if set and not containing TypeScript)
//!       ∧ (any tag shared, if set)
//! ```
//!
//! TypeScript is the registry's authoring language and every package is
//! usable from it, so a language filter that includes it constrains nothing.
//!
//! # Sort Semantics
//!
//! | Key | Primary | Tie-break |
//! |-----|---------|-----------|
//! | `nameAsc` / `nameDesc` | collated name | version precedence, same direction |
//! | `publishDateAsc` / `publishDateDesc` | UTC calendar day | name, opposite direction |
//! | `downloadsAsc` / `downloadsDesc` | download count | name, opposite direction |

mod catalog;
mod collate;
mod entry;
mod error;
mod filter;
mod lenient;
mod ordering;
mod params;
mod query;
mod version;

// Re-export public API
pub use catalog::Catalog;
pub use collate::{compare_names, CollationKey};
pub use entry::{CatalogEntry, ConstructFramework, Language};
pub use error::{CatalogError, Result};
pub use filter::{CompiledFilter, Criterion, FilterField, FilterSpec};
pub use ordering::{
    compare_by_downloads, compare_by_name, compare_by_publish_date, Dir, SortField, SortKey,
};
pub use params::{keys, SearchParams};
pub use query::{execute, CatalogQuery};
pub use version::PackageVersion;
