//! View state
//!
//! The tuple of user-controlled inputs the derived list depends on, plus the
//! selection and the active presentation.

use crate::models::DestinationId;
use crate::query::{FilterCriteria, SortKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which renderer displays the derived list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Cards in a grid
    #[default]
    Grid,
    /// Markers on a map
    Map,
}

impl PresentationMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Map,
            Self::Map => Self::Grid,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid View",
            Self::Map => "Map View",
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current controller inputs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    /// Destination shown in the detail overlay
    pub selection: Option<DestinationId>,
    pub mode: PresentationMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(PresentationMode::default(), PresentationMode::Grid);
        assert_eq!(PresentationMode::Grid.toggled(), PresentationMode::Map);
        assert_eq!(PresentationMode::Map.toggled(), PresentationMode::Grid);
    }

    #[test]
    fn test_default_state() {
        let state = ViewState::default();
        assert!(state.criteria.is_default());
        assert_eq!(state.sort, SortKey::Name);
        assert!(state.selection.is_none());
    }
}
