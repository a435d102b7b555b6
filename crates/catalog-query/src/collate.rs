//! Locale-style collation for package names.
//!
//! Names are compared level by level, the way the root-locale collator
//! behind `localeCompare` does:
//!
//! 1. **Primary**: each character folded to its ASCII base letter, case
//!    folded, and ranked whitespace and punctuation < digit < letter.
//!    Punctuation follows the root collation sequence, not code points.
//! 2. **Secondary**: at the first accent difference, the unaccented
//!    character sorts first.
//! 3. **Tertiary**: at the first case difference, lowercase sorts first.
//! 4. **Identical**: raw string bytes, so distinct names never compare equal.
//!
//! Building the key allocates, so entries compute it once at construction.

use std::cmp::Ordering;

use deunicode::deunicode_char;

// Root collation order of the ASCII punctuation and symbols.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum CharClass {
    Symbol,
    Digit,
    Letter,
}

/// Primary weight of a folded character.
fn primary_weight(c: char) -> (CharClass, u32) {
    if c.is_ascii_digit() {
        (CharClass::Digit, c as u32)
    } else if c.is_alphabetic() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        (CharClass::Letter, lower as u32)
    } else if c.is_whitespace() {
        (CharClass::Symbol, 0)
    } else {
        let rank = match PUNCTUATION.chars().position(|p| p == c) {
            Some(index) => index as u32 + 1,
            None => PUNCTUATION.len() as u32 + 1 + c as u32,
        };
        (CharClass::Symbol, rank)
    }
}

/// Precomputed sort key for a name.
///
/// Field order matters: the derived `Ord` compares levels in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollationKey {
    primary: Vec<(CharClass, u32)>,
    secondary: Vec<bool>,
    tertiary: Vec<bool>,
    raw: String,
}

impl CollationKey {
    /// Builds the collation key for a name.
    pub fn new(name: &str) -> Self {
        let mut primary = Vec::with_capacity(name.len());
        let mut secondary = Vec::with_capacity(name.len());
        let mut tertiary = Vec::with_capacity(name.len());

        for c in name.chars() {
            let accented = !c.is_ascii();
            let upper = c.is_uppercase();
            let folded = if c.is_ascii() {
                None
            } else {
                deunicode_char(c)
            };

            match folded {
                Some(base) => {
                    for f in base.chars() {
                        primary.push(primary_weight(f));
                        secondary.push(accented);
                        tertiary.push(upper);
                    }
                }
                None => {
                    primary.push(primary_weight(c));
                    secondary.push(accented);
                    tertiary.push(upper);
                }
            }
        }

        CollationKey {
            primary,
            secondary,
            tertiary,
            raw: name.to_string(),
        }
    }

    /// Returns the name this key was built from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Compares two names with the collation rules above.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
