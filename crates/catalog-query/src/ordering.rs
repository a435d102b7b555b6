//! Sort keys and the comparators behind them.
//!
//! Every [`SortKey`] resolves to a total comparator over [`CatalogEntry`]
//! values. Ties on the primary field fall back to name order, and name ties
//! fall back to version precedence, so the result of a sort never depends on
//! the stability of the sort algorithm.
//!
//! Date and download ties break by name in the *opposite* direction of the
//! requested sort: an ascending download sort lists equally downloaded
//! packages Z to A.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;
use crate::error::{CatalogError, Result};

/// Direction of a sort key, also used for the reversed tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    pub fn is_asc(self) -> bool {
        self == Dir::Asc
    }

    /// The direction used for date and download tie-breaks.
    pub fn reverse(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        if self.is_asc() {
            ordering
        } else {
            ordering.reverse()
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry attribute a [`SortKey`] orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    PublishDate,
    Downloads,
}

/// Requested result order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PublishDateAsc,
    PublishDateDesc,
    DownloadsAsc,
    DownloadsDesc,
}

impl SortKey {
    /// All sort keys.
    pub const ALL: [SortKey; 6] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PublishDateAsc,
        SortKey::PublishDateDesc,
        SortKey::DownloadsAsc,
        SortKey::DownloadsDesc,
    ];

    /// Builds the key for a field and direction.
    pub fn new(field: SortField, dir: Dir) -> SortKey {
        match (field, dir) {
            (SortField::Name, Dir::Asc) => SortKey::NameAsc,
            (SortField::Name, Dir::Desc) => SortKey::NameDesc,
            (SortField::PublishDate, Dir::Asc) => SortKey::PublishDateAsc,
            (SortField::PublishDate, Dir::Desc) => SortKey::PublishDateDesc,
            (SortField::Downloads, Dir::Asc) => SortKey::DownloadsAsc,
            (SortField::Downloads, Dir::Desc) => SortKey::DownloadsDesc,
        }
    }

    pub fn field(self) -> SortField {
        match self {
            SortKey::NameAsc | SortKey::NameDesc => SortField::Name,
            SortKey::PublishDateAsc | SortKey::PublishDateDesc => SortField::PublishDate,
            SortKey::DownloadsAsc | SortKey::DownloadsDesc => SortField::Downloads,
        }
    }

    pub fn dir(self) -> Dir {
        match self {
            SortKey::NameAsc | SortKey::PublishDateAsc | SortKey::DownloadsAsc => Dir::Asc,
            SortKey::NameDesc | SortKey::PublishDateDesc | SortKey::DownloadsDesc => Dir::Desc,
        }
    }

    /// Compares two entries under this key.
    pub fn compare(self, a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
        match self {
            SortKey::NameAsc => compare_by_name(a, b, Dir::Asc),
            SortKey::NameDesc => compare_by_name(a, b, Dir::Desc),
            SortKey::PublishDateAsc => compare_by_publish_date(a, b, Dir::Asc),
            SortKey::PublishDateDesc => compare_by_publish_date(a, b, Dir::Desc),
            SortKey::DownloadsAsc => compare_by_downloads(a, b, Dir::Asc),
            SortKey::DownloadsDesc => compare_by_downloads(a, b, Dir::Desc),
        }
    }

    /// Returns this key's comparator as a closure, for `sort_by` and friends.
    pub fn comparator(self) -> impl Fn(&CatalogEntry, &CatalogEntry) -> Ordering + Copy {
        move |a: &CatalogEntry, b: &CatalogEntry| self.compare(a, b)
    }

    /// Returns the wire identifier of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "nameAsc",
            SortKey::NameDesc => "nameDesc",
            SortKey::PublishDateAsc => "publishDateAsc",
            SortKey::PublishDateDesc => "publishDateDesc",
            SortKey::DownloadsAsc => "downloadsAsc",
            SortKey::DownloadsDesc => "downloadsDesc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| CatalogError::UnknownSortKey(s.to_string()))
    }
}

/// Name order, with version precedence breaking ties between equal names.
///
/// `Desc` reverses the whole chain, version tie-break included.
pub fn compare_by_name(a: &CatalogEntry, b: &CatalogEntry, dir: Dir) -> Ordering {
    let ordering = if a.name() == b.name() {
        a.version().precedence(b.version())
    } else {
        a.collation_key().cmp(b.collation_key())
    };
    dir.apply(ordering)
}

/// Publication order by UTC calendar day; time of day is ignored.
///
/// Same-day entries fall back to name order in the opposite direction.
pub fn compare_by_publish_date(a: &CatalogEntry, b: &CatalogEntry, dir: Dir) -> Ordering {
    let (day_a, day_b) = (a.publish_day(), b.publish_day());
    if day_a == day_b {
        return compare_by_name(a, b, dir.reverse());
    }
    dir.apply(day_a.cmp(&day_b))
}

/// Download count order.
///
/// Equal counts fall back to name order in the opposite direction.
pub fn compare_by_downloads(a: &CatalogEntry, b: &CatalogEntry, dir: Dir) -> Ordering {
    match a.download_count().cmp(&b.download_count()) {
        Ordering::Equal => compare_by_name(a, b, dir.reverse()),
        ordering => dir.apply(ordering),
    }
}
