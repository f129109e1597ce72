//! Query engine: conjunctive record filtering
//!
//! A record passes when it passes every active filter:
//! 1. search text (trimmed, case-insensitive substring of name, district,
//!    category or description)
//! 2. category (sentinel or exact match)
//! 3. favorites-only (membership in the favorites set)
//!
//! Filtering is pure; order of the output is left to the sort engine.

use super::types::FilterCriteria;
use crate::favorites::FavoriteSet;
use crate::models::Destination;

/// Normalized search needle
///
/// Lowercasing happens once per query instead of once per record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNeedle(String);

impl SearchNeedle {
    /// Build a needle from raw user input, `None` when there is nothing to match
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether any of the four searchable fields contains the needle
    #[must_use]
    pub fn matches(&self, dest: &Destination) -> bool {
        [
            dest.name.as_str(),
            dest.district.as_str(),
            dest.category.as_str(),
            dest.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Check a single record against the criteria
#[must_use]
pub fn matches(dest: &Destination, criteria: &FilterCriteria, favorites: &FavoriteSet) -> bool {
    let needle = SearchNeedle::new(&criteria.search);
    passes(dest, needle.as_ref(), criteria, favorites)
}

fn passes(
    dest: &Destination,
    needle: Option<&SearchNeedle>,
    criteria: &FilterCriteria,
    favorites: &FavoriteSet,
) -> bool {
    if let Some(needle) = needle
        && !needle.matches(dest)
    {
        return false;
    }

    if !criteria.category.matches(&dest.category) {
        return false;
    }

    !criteria.favorites_only || favorites.contains(dest.id)
}

/// Filter records by the criteria
///
/// Returns clones of the passing records; the input is left untouched.
#[must_use]
pub fn filter(
    records: &[Destination],
    criteria: &FilterCriteria,
    favorites: &FavoriteSet,
) -> Vec<Destination> {
    let needle = SearchNeedle::new(&criteria.search);

    records
        .iter()
        .filter(|dest| passes(dest, needle.as_ref(), criteria, favorites))
        .cloned()
        .collect()
}
