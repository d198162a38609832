//! Read-only reference catalogs for task statuses and priorities.
//!
//! A catalog is a small, ordered list of records loaded once from a JSON
//! file. Statuses and priorities share the same record shape, so one type
//! serves both. Catalogs are constructed explicitly and injected into the
//! service; they are never mutated after load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single reference record: stable integer id, machine-readable name,
/// display label, and a short icon string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: u32,
    pub name: String,
    pub label: String,
    pub icon: String,
}

/// A file-backed reference table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Load a catalog from a JSON array file.
    ///
    /// Any read or parse failure logs a warning and yields an empty
    /// catalog; lookups against it then report no match, which callers
    /// must render as "Not available" rather than fail.
    pub fn load(path: &Path) -> Self {
        let records = match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(records) => records,
                Err(e) => {
                    warn!("could not parse catalog {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("could not load catalog {}: {e}", path.display());
                Vec::new()
            }
        };
        Catalog { records }
    }

    /// Build a catalog directly from records, bypassing the filesystem.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Catalog { records }
    }

    /// First record whose id matches, if any.
    pub fn get_by_id(&self, id: u32) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First record whose name matches, if any.
    pub fn get_by_name(&self, name: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// All records in file order. Callers must not assume id order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }
}
