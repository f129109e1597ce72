//! Query and sort engines
//!
//! Derives the displayed list from the dataset, the current criteria and the
//! favorites set. Everything here is a pure function: the derived list is
//! recomputed from scratch on every change and never patched in place.
//!
//! # Examples
//!
//! ```
//! use explorer::favorites::FavoriteSet;
//! use explorer::models::Destination;
//! use explorer::query::{self, FilterCriteria, SortKey};
//!
//! let records = vec![
//!     Destination::new(1, "Valley of Flowers", "Chamoli", "Nature", 4.8),
//!     Destination::new(2, "Kedarnath", "Rudraprayag", "Pilgrimage", 4.9),
//!     Destination::new(3, "Nainital Lake", "Nainital", "Nature", 4.2),
//! ];
//! let criteria = FilterCriteria::builder().category("Nature").build();
//!
//! let derived = query::derive(&records, &criteria, SortKey::Rating, &FavoriteSet::new());
//! let names: Vec<_> = derived.iter().map(|d| d.name.as_str()).collect();
//! assert_eq!(names, ["Valley of Flowers", "Nainital Lake"]);
//! ```

pub mod filter;
pub mod sort;
pub mod types;

pub use filter::{SearchNeedle, filter, matches};
pub use sort::{locale_cmp, sort};
pub use types::{ALL_CATEGORIES, CategoryFilter, FilterCriteria, FilterCriteriaBuilder, SortKey};

use crate::favorites::FavoriteSet;
use crate::models::Destination;

/// Filter then sort, in that order
#[must_use]
pub fn derive(
    records: &[Destination],
    criteria: &FilterCriteria,
    key: SortKey,
    favorites: &FavoriteSet,
) -> Vec<Destination> {
    let mut derived = filter(records, criteria, favorites);
    sort::sort_in_place(&mut derived, key);
    derived
}

/// Distinct categories present in a dataset, in locale order
#[must_use]
pub fn categories(records: &[Destination]) -> Vec<String> {
    let mut categories: Vec<String> = records
        .iter()
        .map(|d| d.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort_by(|a, b| locale_cmp(a, b));
    categories.dedup();
    categories
}
