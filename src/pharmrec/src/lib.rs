//! Parser for fixed-layout dispensing record files from legacy Korean
//! pharmacy-management systems.
//!
//! Files are flat text in the ks_c_5601-1987 code page (windows-949
//! family), one dispensing record per line. Field positions are defined in
//! **bytes**, not characters: a Hangul glyph occupies two bytes, so every
//! offset in this crate is an offset into the encoded buffer.
//!
//! # Format Overview
//!
//! ## Patient header (fixed byte layout, start of each record)
//!
//! | field             | offset | len |
//! |-------------------|-------:|----:|
//! | patient code      |      0 |  10 |
//! | patient name      |     10 |  20 |
//! | birth date        |     30 |   8 |
//! | sex code          |     38 |   1 |
//! | prescription date |     39 |   8 |
//! | sequence number   |     47 |   2 |
//! | hospital code     |     49 |   8 |
//! | doctor name       |     57 |  20 |
//!
//! ## Medication payload (`|DRUG_S|` ... `|DRUG_E|`)
//!
//! The payload between the tags holds one or more medication codes (class
//! letter `A` or `E` plus 9 digits), each followed by a 50-byte name
//! window. Dosage data is addressed *backward* from the next structural
//! boundary: the 10-byte dosage block of the last code sits 40 bytes
//! before the end tag; every earlier block sits 42 bytes before the next
//! code. See [`drug`] for the window layout.
//!
//! ## Legacy layout (no tags)
//!
//! Older files separate medications with a `@@@` delimiter instead of
//! tags; dosage data sits in the trailing 40 bytes of each segment. This
//! path recovers less reliably and is flagged per record, see [`legacy`].

pub mod codec;
pub mod drug;
pub mod legacy;
pub mod master;
pub mod parse;
pub mod patient;
pub mod record;
pub mod section;

// Re-export main types
pub use codec::{decode, decode_lossy, encode, extract_field};
pub use drug::{decode_entries, scan_codes, CodeHit, Dosage, DrugEntry};
pub use legacy::decode as decode_legacy;
pub use master::DrugMaster;
pub use parse::{parse_buffer, parse_file, ParseResult, RecordEntry};
pub use patient::{age_on, format_date, sex_label, Patient};
pub use record::split_records;
pub use section::{locate as locate_section, Section};

/// Tag opening the medication payload within a record
pub const SECTION_START: &str = "|DRUG_S|";

/// Tag closing the medication payload
pub const SECTION_END: &str = "|DRUG_E|";

/// Segment delimiter used by the tag-less legacy layout
pub const LEGACY_DELIM: &str = "@@@";

/// Class letters a medication code may start with
pub const CODE_CLASSES: [char; 2] = ['A', 'E'];

/// Class letters recognized by the legacy delimiter re-split
pub const LEGACY_CODE_CLASSES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Digits in a medication code after the class letter
pub const CODE_DIGITS: usize = 9;

/// Errors from dispensing-file parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer is not valid ks_c_5601-1987 data: {0}")]
    Codec(String),

    #[error("Invalid master table: {0}")]
    Master(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check if a record carries the tagged medication payload
pub fn has_section_tags(record: &[u8]) -> bool {
    section::locate(record).is_some()
}
