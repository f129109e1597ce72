//! Criteria data structures
//!
//! This module defines the inputs of the query engine:
//! - `CategoryFilter`: the "All" sentinel or one exact category
//! - `SortKey`: the fixed set of orderings
//! - `FilterCriteria`: search text, category and favorites-only flag

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category selector text that means "no restriction"
pub const ALL_CATEGORIES: &str = "All";

/// Category restriction of a query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every category passes
    #[default]
    All,
    /// Only records whose category equals this text exactly (case-sensitive)
    Exactly(String),
}

impl CategoryFilter {
    /// Whether a record category passes this filter
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(wanted) => wanted == category,
        }
    }

    /// Text shown in filter controls
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Exactly(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Exactly(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Exactly(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Exactly(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to the filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortKey {
    /// Ascending by name
    #[default]
    Name,
    /// Descending by rating
    Rating,
    /// Ascending by district
    District,
}

impl SortKey {
    /// All keys in the order filter controls cycle through them
    pub const ALL: [Self; 3] = [Self::Name, Self::Rating, Self::District];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::District => "district",
        }
    }

    /// Human-readable label for controls
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Rating => "Rating",
            Self::District => "District",
        }
    }

    /// The key after this one, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Rating,
            Self::Rating => Self::District,
            Self::District => Self::Name,
        }
    }
}

/// Unrecognized keys fall back to `Name`.
impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "rating" => Self::Rating,
            "district" => Self::District,
            _ => Self::Name,
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter criteria, replaced wholesale on every edit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text matched against name, district, category and description
    #[serde(default)]
    pub search: String,

    /// Category restriction
    #[serde(default)]
    pub category: CategoryFilter,

    /// Only keep favorited destinations
    #[serde(default)]
    pub favorites_only: bool,
}

impl FilterCriteria {
    /// Create a new filter criteria builder
    #[must_use]
    pub fn builder() -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::default()
    }

    /// True when every filter is at its pass-through value
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search.trim().is_empty() && self.category == CategoryFilter::All && !self.favorites_only
    }
}

/// Builder for `FilterCriteria`
#[derive(Debug, Clone, Default)]
pub struct FilterCriteriaBuilder {
    search: String,
    category: CategoryFilter,
    favorites_only: bool,
}

impl FilterCriteriaBuilder {
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub const fn favorites_only(mut self, enabled: bool) -> Self {
        self.favorites_only = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> FilterCriteria {
        FilterCriteria {
            search: self.search,
            category: self.category,
            favorites_only: self.favorites_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sentinel() {
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("all"),
            CategoryFilter::Exactly("all".to_string())
        );
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn test_category_match_is_exact() {
        let filter = CategoryFilter::from("Nature");
        assert!(filter.matches("Nature"));
        assert!(!filter.matches("nature"));
        assert!(!filter.matches("Nature Trail"));
        assert!(CategoryFilter::All.matches("anything"));
    }

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::from("rating"), SortKey::Rating);
        assert_eq!(SortKey::from("District"), SortKey::District);
        assert_eq!(SortKey::from("name"), SortKey::Name);
        assert_eq!(SortKey::from("popularity"), SortKey::Name);
        assert_eq!(SortKey::from(""), SortKey::Name);
        assert_eq!(SortKey::default(), SortKey::Name);
    }

    #[test]
    fn test_sort_key_cycle() {
        let mut key = SortKey::Name;
        for _ in 0..SortKey::ALL.len() {
            key = key.next();
        }
        assert_eq!(key, SortKey::Name);
    }

    #[test]
    fn test_criteria_builder() {
        let criteria = FilterCriteria::builder()
            .search("lake")
            .category("Nature")
            .favorites_only(true)
            .build();

        assert_eq!(criteria.search, "lake");
        assert_eq!(criteria.category, CategoryFilter::Exactly("Nature".into()));
        assert!(criteria.favorites_only);
        assert!(!criteria.is_default());
        assert!(FilterCriteria::default().is_default());
    }

    #[test]
    fn test_criteria_toml_roundtrip_uses_sentinel_text() {
        let criteria = FilterCriteria::builder().category("All").build();
        let text = toml::to_string(&criteria).unwrap();
        assert!(text.contains("category = \"All\""));
    }
}
