//! Catalog record types
//!
//! A [`Destination`] is one row of the `destinations` table. Records are
//! treated as immutable values: the engine never edits a field, it only
//! filters, orders and references them by [`DestinationId`].
//!
//! Field names follow the lowercase column names of the remote table so the
//! same type deserializes from the REST endpoint, a JSON export or a CSV file.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Numeric identifier of a destination, unique within a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(pub u64);

impl DestinationId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DestinationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for DestinationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Read an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One catalog record
///
/// Text fields default to empty strings when the source omits them; the
/// engine does not validate record content. Location and image are only
/// read by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub district: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Destination {
    /// Create a destination with the fields the engine reads
    ///
    /// Presentation-only fields start empty; use the `with_*` setters to fill them.
    #[must_use]
    pub fn new(
        id: impl Into<DestinationId>,
        name: impl Into<String>,
        district: impl Into<String>,
        category: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            district: district.into(),
            category: category.into(),
            description: String::new(),
            rating,
            best_time_to_visit: None,
            latitude: None,
            longitude: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn with_best_time(mut self, best_time: impl Into<String>) -> Self {
        self.best_time_to_visit = Some(best_time.into());
        self
    }

    /// Map coordinates, if both are known
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Destination {}

impl Hash for Destination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
