//! Drug master table
//!
//! Read-only reference mapping 9-digit medication codes to their
//! registered names. The table is loaded once by the caller and handed
//! around by reference; the parser itself never consults it, which keeps
//! record decoding a pure function of the record bytes.

use std::collections::HashMap;
use std::path::Path;

use crate::Result;

/// Code → registered-name reference table
#[derive(Debug, Default, Clone)]
pub struct DrugMaster {
    entries: HashMap<String, String>,
}

impl DrugMaster {
    /// Load the table from a JSON object file (`{"<code>": "<name>", ...}`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let entries = serde_json::from_str(&contents)?;
        Ok(Self { entries })
    }

    /// Build a table from an in-memory map.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Registered name for a stripped 9-digit code.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
