//! Sort engine
//!
//! Orders a filtered list by one [`SortKey`]. Text keys use a locale-style
//! comparison: accents and case are ignored at the primary level, so
//! "Éclair" sorts next to "eclair" rather than after "z". Ties at the primary
//! level fall back to plain code-point order to keep the result total.
//!
//! Sorting is stable. Records that compare equal keep the order they had in
//! the filtered input, which is the dataset order.

use super::types::SortKey;
use crate::models::Destination;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Primary collation key: decomposed, diacritics stripped, lowercased
fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two strings the way a locale-aware UI would
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Comparator for a sort key
#[must_use]
pub fn compare(a: &Destination, b: &Destination, key: SortKey) -> Ordering {
    match key {
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::District => locale_cmp(&a.district, &b.district),
        SortKey::Name => locale_cmp(&a.name, &b.name),
    }
}

/// Return a new sequence ordered by `key`
///
/// The input slice is not modified.
#[must_use]
pub fn sort(records: &[Destination], key: SortKey) -> Vec<Destination> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, key);
    sorted
}

/// Order an owned list, used when the caller already holds a fresh copy
pub fn sort_in_place(records: &mut [Destination], key: SortKey) {
    match key {
        // Compute each text key once instead of per comparison
        SortKey::Name => records.sort_by_cached_key(|d| (collation_key(&d.name), d.name.clone())),
        SortKey::District => {
            records.sort_by_cached_key(|d| (collation_key(&d.district), d.district.clone()));
        }
        SortKey::Rating => records.sort_by(|a, b| compare(a, b, key)),
    }
}
