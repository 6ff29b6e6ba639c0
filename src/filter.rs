//! Status filter selection
//!
//! A UI shows one chip per [`Filter`]. At most one filter is active at a time, and
//! tapping the active chip again clears the selection.

use crate::types::Status;
use serde::{Deserialize, Serialize};

/// A selectable status filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Only living characters
    Alive,
    /// Only dead characters
    Dead,
    /// Only characters of unknown status
    Unknown,
}

impl Filter {
    /// All filters in display order
    pub const ALL: [Filter; 3] = [Filter::Alive, Filter::Dead, Filter::Unknown];

    /// The domain status this filter selects
    pub fn to_status(self) -> Status {
        match self {
            Filter::Alive => Status::Alive,
            Filter::Dead => Status::Dead,
            Filter::Unknown => Status::Unknown,
        }
    }
}

impl From<Filter> for Status {
    fn from(filter: Filter) -> Self {
        filter.to_status()
    }
}

/// Selection after `tapped` is tapped while `current` is active
///
/// Tapping the active filter deselects it; tapping any other replaces the selection.
pub fn toggle(current: Option<Filter>, tapped: Filter) -> Option<Filter> {
    if current == Some(tapped) {
        None
    } else {
        Some(tapped)
    }
}
