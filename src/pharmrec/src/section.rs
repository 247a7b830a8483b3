//! Medication payload location
//!
//! The modern layout bounds the payload with the `|DRUG_S|` / `|DRUG_E|`
//! tag pair. The pipe byte (0x7C) is never a trail byte of this code
//! page, so the tags can be found directly in the encoded buffer without
//! risking a match inside a double-byte sequence.

use memchr::memmem;

use crate::{SECTION_END, SECTION_START};

/// Byte offsets bounding the medication payload within a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// First payload byte, just past the start tag
    pub payload_start: usize,
    /// Byte where the end tag begins
    pub end_start: usize,
}

/// Find the tag pair bounding the medication payload.
///
/// Returns `None` when either tag is missing; the record then belongs to
/// the tag-less legacy layout, which is not an error.
pub fn locate(record: &[u8]) -> Option<Section> {
    let start = memmem::find(record, SECTION_START.as_bytes())?;
    let payload_start = start + SECTION_START.len();
    let end_rel = memmem::find(&record[payload_start..], SECTION_END.as_bytes())?;
    Some(Section {
        payload_start,
        end_start: payload_start + end_rel,
    })
}
