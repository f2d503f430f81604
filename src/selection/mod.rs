//! Selection state and the controller that drives it
//!
//! The controller holds the only `SelectionState` in the process. It has two
//! states: nothing selected (initial, focus on the regional centroid) and a
//! selected record (focus on that record). A pick that resolves replaces the
//! state wholesale; a pick that doesn't resolve leaves it untouched.

pub mod session;

use crate::catalog::{Catalog, LocalityRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use session::{Origin, SessionHandle};

/// Map center coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Focus {
    pub lat: f64,
    pub lon: f64,
}

impl Focus {
    /// Centre of Corsica, used when nothing is selected
    pub const REGIONAL_CENTROID: Focus = Focus {
        lat: 42.15,
        lon: 9.08,
    };

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn of(record: &LocalityRecord) -> Self {
        Self {
            lat: record.latitude,
            lon: record.longitude,
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::REGIONAL_CENTROID
    }
}

/// Current selection and map focus, replaced as a whole on every pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected: Option<LocalityRecord>,
    pub focus: Focus,
}

impl SelectionState {
    /// Nothing selected, map centered on `focus`
    pub fn initial(focus: Focus) -> Self {
        Self {
            selected: None,
            focus,
        }
    }

    fn of(record: &LocalityRecord) -> Self {
        Self {
            selected: Some(record.clone()),
            focus: Focus::of(record),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|r| r.id.as_str())
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::initial(Focus::default())
    }
}

/// Resolves picks against the catalog and owns the resulting state
#[derive(Debug, Clone)]
pub struct SelectionController {
    catalog: Arc<Catalog>,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(catalog: Arc<Catalog>, default_focus: Focus) -> Self {
        Self {
            catalog,
            state: SelectionState::initial(default_focus),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Select the record with `id`, or keep the current state if it is unknown
    pub fn select(&mut self, id: &str) -> &SelectionState {
        if let Some(record) = self.catalog.find_by_id(id) {
            self.state = SelectionState::of(record);
        }
        &self.state
    }
}
