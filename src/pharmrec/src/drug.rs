//! Medication code scanning and reverse-addressed dosage decoding
//!
//! The payload format anchors dosage data to the *following* boundary: a
//! drug name carries a variable amount of trailing padding, so the 10-byte
//! dosage block of each code is found by walking backward from the next
//! code (42 bytes) or, for the last code, from the end tag (40 bytes).
//! Forward addressing from the code itself would be unreliable; backward
//! addressing from the next fixed boundary is exact.
//!
//! Window layout per code occurrence:
//!
//! ```text
//! A123456789 <------ 50-byte name window ------> ... [ddd f aaaaaa] ...
//! ^ code (10 bytes)          dosage block: days / per-day / amount ^
//! ```

use serde::{Deserialize, Serialize};

use crate::section::Section;
use crate::{codec, CODE_CLASSES, CODE_DIGITS};

/// Code length in bytes: class letter plus digits
pub(crate) const CODE_LEN: usize = 1 + CODE_DIGITS;

/// Name window length in bytes, immediately after the code
pub(crate) const NAME_LEN: usize = 50;

/// Dosage block length in bytes
pub(crate) const DOSE_LEN: usize = 10;

/// Backward distance from the end tag to the last code's dosage block
const DOSE_BACK_FROM_END: usize = 40;

/// Backward distance from the next code to an earlier code's dosage block
const DOSE_BACK_FROM_NEXT: usize = 42;

/// One medication-code occurrence found in the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeHit {
    /// The 9 digits, class letter stripped
    pub code: String,
    /// Byte offset of the class letter within the record
    pub offset: usize,
}

/// One validated medication line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugEntry {
    /// 9-digit medication code
    pub code: String,
    /// Name window contents, cut at the first embedded separator
    pub name: String,
    /// Prescription days, as written (e.g. `"007"`)
    pub days: String,
    /// Doses per day, single digit 1-9
    pub per_day: String,
    /// Single-dose amount, decimal string
    pub amount: String,
}

/// The three dosage sub-fields of one 10-byte block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub days: String,
    pub per_day: String,
    pub amount: String,
}

impl Dosage {
    /// Validate and split a decoded dosage window.
    ///
    /// Sub-fields: chars 0-2 prescription days (right-trimmed, integer
    /// 1-999), char 3 doses per day (digit 1-9), chars 4-9 single-dose
    /// amount (right-trimmed, digits with at most one decimal point,
    /// greater than zero). A window that fails any check yields `None`;
    /// an empty window from an out-of-range slice fails naturally.
    pub fn parse(window: &str) -> Option<Self> {
        let chars: Vec<char> = window.chars().collect();

        let days_raw: String = chars.get(..3)?.iter().collect();
        let days = days_raw.trim_end();
        let count: u32 = days.parse().ok()?;
        if count == 0 || count > 999 {
            return None;
        }

        let per_day = *chars.get(3)?;
        if !per_day.is_ascii_digit() || per_day == '0' {
            return None;
        }

        let amount_raw: String = chars.iter().skip(4).take(6).collect();
        let amount = amount_raw.trim_end();
        if !valid_amount(amount) {
            return None;
        }

        Some(Self {
            days: days.to_string(),
            per_day: per_day.to_string(),
            amount: amount.to_string(),
        })
    }
}

/// Digits with at most one decimal point, parsing to a positive number.
pub(crate) fn valid_amount(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|&c| c == '.').count() <= 1
        && s.parse::<f64>().map(|v| v > 0.0).unwrap_or(false)
}

/// Scan the bounded payload for medication codes.
///
/// Leftmost, non-overlapping matches of a class letter followed by exactly
/// nine digits. The pattern is pure ASCII and both lead and trail bytes of
/// this code page sit at 0x81 and above, so the scan runs directly over
/// the encoded bytes: offsets are exact, double-byte text cannot produce a
/// false match, and a malformed sequence elsewhere in the payload does not
/// hide codes it never touched.
pub fn scan_codes(record: &[u8], section: &Section) -> Vec<CodeHit> {
    let Some(payload) = record.get(section.payload_start..section.end_start) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    let mut i = 0;
    while i + CODE_LEN <= payload.len() {
        if CODE_CLASSES.contains(&(payload[i] as char))
            && payload[i + 1..i + CODE_LEN].iter().all(u8::is_ascii_digit)
        {
            hits.push(CodeHit {
                code: payload[i + 1..i + CODE_LEN]
                    .iter()
                    .map(|&b| b as char)
                    .collect(),
                offset: section.payload_start + i,
            });
            i += CODE_LEN;
        } else {
            i += 1;
        }
    }
    hits
}

/// Decode all medication entries of a tagged record.
///
/// One entry per code occurrence whose dosage block validates; failing
/// occurrences are dropped without affecting their siblings. Order follows
/// the payload.
pub fn decode_entries(record: &[u8], section: &Section) -> Vec<DrugEntry> {
    let hits = scan_codes(record, section);
    let mut entries = Vec::with_capacity(hits.len());

    for (i, hit) in hits.iter().enumerate() {
        let window_start = match hits.get(i + 1) {
            Some(next) => next.offset.checked_sub(DOSE_BACK_FROM_NEXT),
            None => section.end_start.checked_sub(DOSE_BACK_FROM_END),
        };
        let Some(window_start) = window_start else {
            continue;
        };

        let window = codec::decode_window(record, window_start, DOSE_LEN);
        let Some(dosage) = Dosage::parse(&window) else {
            continue;
        };

        entries.push(DrugEntry {
            code: hit.code.clone(),
            name: decode_name(record, hit.offset + CODE_LEN),
            days: dosage.days,
            per_day: dosage.per_day,
            amount: dosage.amount,
        });
    }
    entries
}

/// Decode the 50-byte name window, cut at the first embedded separator.
fn decode_name(record: &[u8], start: usize) -> String {
    let window = codec::decode_window(record, start, NAME_LEN);
    let cut = window.find(['\n', '\r', '|']).unwrap_or(window.len());
    window[..cut].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section;
    use crate::{SECTION_END, SECTION_START};

    /// Pad text to an exact encoded byte width.
    fn padded(text: &str, width: usize) -> Vec<u8> {
        let mut bytes = codec::encode(text);
        assert!(bytes.len() <= width, "test field wider than its window");
        bytes.resize(width, b' ');
        bytes
    }

    fn tagged(payload: &[u8]) -> Vec<u8> {
        let mut record = b"HDR".to_vec();
        record.extend_from_slice(SECTION_START.as_bytes());
        record.extend_from_slice(payload);
        record.extend_from_slice(SECTION_END.as_bytes());
        record
    }

    /// Payload with one code: name window, dosage block 40 bytes before
    /// the end tag.
    fn single_code_payload(code: &str, name: &str, dose: &str) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(code.as_bytes());
        p.extend_from_slice(&padded(name, NAME_LEN));
        p.extend_from_slice(&padded(dose, DOSE_LEN));
        p.extend_from_slice(&[b' '; 30]);
        p
    }

    #[test]
    fn test_scan_codes() {
        let record = tagged(&single_code_payload("A123456789", "Aspirin", "0072000500"));
        let section = section::locate(&record).unwrap();
        let hits = scan_codes(&record, &section);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "123456789");
        assert_eq!(hits[0].offset, section.payload_start);
    }

    #[test]
    fn test_scan_rejects_short_digit_runs() {
        let record = tagged(b"A12345 E123456789 B123456789");
        let section = section::locate(&record).unwrap();
        let hits = scan_codes(&record, &section);
        // A12345 is too short, B is not a modern class letter
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "123456789");
    }

    #[test]
    fn test_scan_offsets_stable_under_hangul() {
        let mut payload = codec::encode("타이레놀 ");
        let hangul_width = payload.len();
        payload.extend_from_slice(b"E987654321");
        let record = tagged(&payload);
        let section = section::locate(&record).unwrap();
        let hits = scan_codes(&record, &section);
        assert_eq!(hits[0].offset, section.payload_start + hangul_width);
    }

    #[test]
    fn test_malformed_byte_in_padding_keeps_entries() {
        let mut p = single_code_payload("A123456789", "Aspirin", "0072000500");
        let last = p.len() - 1;
        p[last] = 0xB0; // truncated double-byte sequence in trailing padding
        let record = tagged(&p);
        let section = section::locate(&record).unwrap();
        let entries = decode_entries(&record, &section);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "123456789");
        assert_eq!(entries[0].name, "Aspirin");
        assert_eq!(entries[0].days, "007");
    }

    #[test]
    fn test_decode_single_entry() {
        let record = tagged(&single_code_payload(
            "A123456789",
            "아스피린정 100mg",
            "0072000500",
        ));
        let section = section::locate(&record).unwrap();
        let entries = decode_entries(&record, &section);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "123456789");
        assert_eq!(entries[0].name, "아스피린정 100mg");
        assert_eq!(entries[0].days, "007");
        assert_eq!(entries[0].per_day, "2");
        assert_eq!(entries[0].amount, "000500");
    }

    #[test]
    fn test_decode_two_entries_second_invalid() {
        // First block sits 42 bytes before the second code, second block
        // 40 bytes before the end tag.
        let mut p = Vec::new();
        p.extend_from_slice(b"A111111111");
        p.extend_from_slice(&padded("First drug", NAME_LEN));
        p.extend_from_slice(&padded("0031001.50", DOSE_LEN));
        p.extend_from_slice(&[b' '; 32]);
        p.extend_from_slice(b"E222222222");
        p.extend_from_slice(&padded("Second drug", NAME_LEN));
        p.extend_from_slice(&padded("0030001000", DOSE_LEN)); // frequency 0: invalid
        p.extend_from_slice(&[b' '; 30]);

        let record = tagged(&p);
        let section = section::locate(&record).unwrap();
        let entries = decode_entries(&record, &section);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "111111111");
        assert_eq!(entries[0].days, "003");
        assert_eq!(entries[0].per_day, "1");
        assert_eq!(entries[0].amount, "001.50");
    }

    #[test]
    fn test_decode_both_entries_valid() {
        let mut p = Vec::new();
        p.extend_from_slice(b"A111111111");
        p.extend_from_slice(&padded("First", NAME_LEN));
        p.extend_from_slice(&padded("0031000100", DOSE_LEN));
        p.extend_from_slice(&[b' '; 32]);
        p.extend_from_slice(b"E222222222");
        p.extend_from_slice(&padded("Second", NAME_LEN));
        p.extend_from_slice(&padded("0142000250", DOSE_LEN));
        p.extend_from_slice(&[b' '; 30]);

        let record = tagged(&p);
        let section = section::locate(&record).unwrap();
        let entries = decode_entries(&record, &section);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "111111111");
        assert_eq!(entries[1].code, "222222222");
        assert_eq!(entries[1].days, "014");
        assert_eq!(entries[1].amount, "000250");
    }

    #[test]
    fn test_decode_empty_payload() {
        let record = tagged(b"no codes in here");
        let section = section::locate(&record).unwrap();
        assert!(decode_entries(&record, &section).is_empty());
    }

    #[test]
    fn test_short_payload_window_underflow_dropped() {
        // End tag closer than 40 bytes to the payload start: the backward
        // window lands before the record and the occurrence is dropped.
        let record = tagged(b"A123456789 x");
        let section = section::locate(&record).unwrap();
        assert!(decode_entries(&record, &section).is_empty());
    }

    #[test]
    fn test_name_truncates_at_pipe() {
        let mut p = Vec::new();
        p.extend_from_slice(b"A123456789");
        p.extend_from_slice(&padded("Short name|trailing junk", NAME_LEN));
        p.extend_from_slice(&padded("0011000001", DOSE_LEN));
        p.extend_from_slice(&[b' '; 30]);
        let record = tagged(&p);
        let section = section::locate(&record).unwrap();
        let entries = decode_entries(&record, &section);
        assert_eq!(entries[0].name, "Short name");
    }

    #[test]
    fn test_dosage_parse() {
        let d = Dosage::parse("0072000500").unwrap();
        assert_eq!(d.days, "007");
        assert_eq!(d.per_day, "2");
        assert_eq!(d.amount, "000500");

        let d = Dosage::parse("30 3001.25").unwrap();
        assert_eq!(d.days, "30");
        assert_eq!(d.per_day, "3");
        assert_eq!(d.amount, "001.25");
    }

    #[test]
    fn test_dosage_parse_rejects() {
        assert_eq!(Dosage::parse(""), None);
        assert_eq!(Dosage::parse("0070000500"), None); // frequency 0
        assert_eq!(Dosage::parse("0002000500"), None); // zero days
        assert_eq!(Dosage::parse("ab12000500"), None); // non-numeric days
        assert_eq!(Dosage::parse("0072000000"), None); // zero amount
        assert_eq!(Dosage::parse("00720.0.50"), None); // two decimal points
        assert_eq!(Dosage::parse("0072"), None); // truncated window
    }

    #[test]
    fn test_valid_amount() {
        assert!(valid_amount("000500"));
        assert!(valid_amount("1.5"));
        assert!(!valid_amount(""));
        assert!(!valid_amount("0"));
        assert!(!valid_amount("1..5"));
        assert!(!valid_amount("12a"));
    }
}
