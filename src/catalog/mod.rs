//! Locality catalog
//!
//! The catalog is built once at startup from the compiled-in fixture and is
//! read-only for the rest of the process. Records are kept sorted by name
//! under locale-aware comparison; every surface renders them in this order.

pub mod collate;
mod fixture;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use collate::locale_cmp;

/// One geographic locality (a commune, identified by its INSEE code)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityRecord {
    /// Stable identity key, unique within the catalog
    pub id: String,
    /// Display name, also the sort key
    pub name: String,
    /// Year of creation (informational, unvalidated)
    pub founded_year: i32,
    /// Free-text dissolution label; `None` means still active
    pub dissolved_label: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Read-only ordered collection of localities with an id index
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<LocalityRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog from the compiled-in dataset
    pub fn load() -> Self {
        Self::from_records(
            fixture::HAUTE_CORSE
                .iter()
                .map(|entry| entry.to_record())
                .collect(),
        )
    }

    /// Build a catalog from arbitrary records
    ///
    /// Records are sorted by name. When two records share an id, the one that
    /// sorts first is kept and the other is dropped.
    pub fn from_records(mut records: Vec<LocalityRecord>) -> Self {
        records.sort_by(|a, b| locale_cmp(&a.name, &b.name));

        let mut index = HashMap::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());
        for record in records {
            if index.contains_key(&record.id) {
                tracing::warn!(id = %record.id, name = %record.name, "Dropping duplicate locality id");
                continue;
            }
            index.insert(record.id.clone(), unique.len());
            unique.push(record);
        }

        Self {
            records: unique,
            index,
        }
    }

    /// All records in catalog order
    pub fn records(&self) -> &[LocalityRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalityRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn find_by_id(&self, id: &str) -> Option<&LocalityRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    /// Position of a record in catalog order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LocalityRecord;
    type IntoIter = std::slice::Iter<'a, LocalityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
