//! Whole-file parsing
//!
//! A file either parses (possibly with records that contribute zero
//! medications) or fails as a whole: unreadable path, or a buffer that is
//! not valid ks_c_5601-1987 data. Nothing below file level propagates:
//! bad fields decode to `""` and bad dosage blocks drop their occurrence,
//! never the record or the file.

use std::path::Path;

use serde::Serialize;

use crate::drug::DrugEntry;
use crate::patient::Patient;
use crate::{codec, drug, legacy, record, section, Error};

/// Parse output for one file
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub success: bool,
    pub file_path: String,
    pub file_name: String,
    /// File stem, used as the cross-record source serial
    pub preserial: String,
    pub records: Vec<RecordEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One record: patient plus decoded medications
#[derive(Debug, Clone, Serialize)]
pub struct RecordEntry {
    pub patient: Patient,
    pub drugs: Vec<DrugEntry>,
    /// True when the record had no payload tags and went through the
    /// lower-confidence legacy decoder
    pub legacy_layout: bool,
}

impl ParseResult {
    fn failure(path: &Path, error: String) -> Self {
        Self {
            success: false,
            file_path: path.display().to_string(),
            file_name: file_name(path),
            preserial: file_stem(path),
            records: Vec::new(),
            error: Some(error),
        }
    }
}

/// Parse one dispensing file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult {
    let path = path.as_ref();

    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => return ParseResult::failure(path, format!("Failed to read file: {e}")),
    };

    if codec::decode(&data).is_none() {
        let err = Error::Codec("malformed double-byte sequence".to_string());
        return ParseResult::failure(path, err.to_string());
    }

    let preserial = file_stem(path);
    let records = parse_buffer(&data, &preserial);

    ParseResult {
        success: true,
        file_path: path.display().to_string(),
        file_name: file_name(path),
        preserial,
        records,
        error: None,
    }
}

/// Parse an already-read buffer.
///
/// Every non-blank line yields one record. Records with payload tags go
/// through the tagged decoder; the rest fall back to the legacy layout.
pub fn parse_buffer(data: &[u8], preserial: &str) -> Vec<RecordEntry> {
    record::split_records(data)
        .map(|line| {
            let patient = Patient::decode(line, preserial);
            let (drugs, legacy_layout) = match section::locate(line) {
                Some(section) => (drug::decode_entries(line, &section), false),
                None => (legacy::decode(line), true),
            };
            RecordEntry {
                patient,
                drugs,
                legacy_layout,
            }
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
