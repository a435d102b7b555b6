//! Forgiving decoding of criterion values.
//!
//! Filter criteria arrive from query strings and hand-written JSON. A value
//! of the wrong shape never fails the surrounding document: it decodes into
//! [`RawValue`] and the typed accessors turn it into `None` or an empty list.

use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::debug;

use crate::entry::Language;

/// Any JSON value, kept just structured enough to pick criteria out of.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
    List(Vec<RawValue>),
    Other(IgnoredAny),
}

impl RawValue {
    /// The value as a string, only if it is one.
    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            RawValue::Text(text) => Some(text),
            other => {
                debug!(value = ?other, "ignoring non-string criterion value");
                None
            }
        }
    }

    /// The value rendered the way it would appear in a query string.
    /// Lists are joined with commas.
    pub(crate) fn into_param(self) -> Option<String> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::Integer(n) => Some(n.to_string()),
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Flag(b) => Some(b.to_string()),
            RawValue::List(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(Self::into_param).collect();
                Some(parts.join(","))
            }
            RawValue::Other(_) => None,
        }
    }

    /// The value as a framework major version.
    pub(crate) fn into_major(self) -> Option<i64> {
        match self {
            RawValue::Integer(n) => Some(n),
            RawValue::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(n as i64),
            RawValue::Text(text) => parse_major_version(&text),
            other => {
                debug!(value = ?other, "ignoring non-integer framework major version");
                None
            }
        }
    }

    /// The string members of a list, or a lone string as a one-item list.
    pub(crate) fn into_strings(self) -> Vec<String> {
        match self {
            RawValue::List(items) => items.into_iter().filter_map(Self::into_text).collect(),
            RawValue::Text(text) => vec![text],
            other => {
                debug!(value = ?other, "ignoring non-list criterion value");
                Vec::new()
            }
        }
    }

    /// The recognized languages among the value's strings.
    pub(crate) fn into_languages(self) -> Vec<Language> {
        self.into_strings()
            .into_iter()
            .filter_map(|id| match id.parse::<Language>() {
                Ok(language) => Some(language),
                Err(err) => {
                    debug!(%err, "ignoring language filter value");
                    None
                }
            })
            .collect()
    }
}

/// Parses a framework major version.
///
/// Any integer is accepted. Integers beyond `i64` saturate; no framework has
/// such a major, so the criterion still matches nothing. Anything else,
/// decimals included, is `None`.
pub(crate) fn parse_major_version(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(major) = raw.parse::<i64>() {
        return Some(major);
    }

    let digits = raw.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        debug!(value = raw, "ignoring non-integer framework major version");
        return None;
    }

    Some(if raw.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}
