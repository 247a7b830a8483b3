//! Tag-less legacy record layout
//!
//! Files written before the payload tags were introduced separate
//! medications with a `@@@` delimiter; some even older producers used no
//! delimiter at all and are re-split on the two-characters-plus-class-
//! letter pattern. Dosage data sits in the trailing 40 bytes of each
//! segment instead of a reverse-addressed block, which recovers less
//! reliably than the tagged layout; callers see the difference through
//! the per-record layout flag on parse output. Kept as its own path, not
//! folded into the tagged decoder.

use crate::drug::{valid_amount, DrugEntry};
use crate::{codec, LEGACY_CODE_CLASSES, LEGACY_DELIM};

/// Byte position and length of the name window within a segment
const NAME_WINDOW: (usize, usize) = (15, 50);

/// Trailing window holding the dosage sub-fields
const TAIL_LEN: usize = 40;

/// Decode the medications of a tag-less record.
///
/// One entry per non-empty segment after the leading header segment.
/// Dosage sub-fields are kept individually when plausible and blanked
/// otherwise; unlike the tagged path, an implausible dosage does not drop
/// the entry.
pub fn decode(record: &[u8]) -> Vec<DrugEntry> {
    let Some(text) = codec::decode(record) else {
        return Vec::new();
    };

    let mut segments: Vec<&str> = text.split(LEGACY_DELIM).collect();
    if segments.len() < 2 {
        segments = split_on_class_pattern(&text);
    }
    if segments.len() < 2 {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for segment in segments.into_iter().skip(1) {
        if segment.trim().is_empty() {
            continue;
        }
        if let Some(entry) = decode_segment(segment) {
            entries.push(entry);
        }
    }
    entries
}

fn decode_segment(segment: &str) -> Option<DrugEntry> {
    let code: String = segment.chars().take(9).collect::<String>().trim().to_string();
    if code.is_empty() {
        return None;
    }

    // Segment boundaries were found in decoded text; window offsets are
    // byte positions, so go back through the encoded form.
    let bytes = codec::encode(segment);
    let name = codec::extract_field(&bytes, NAME_WINDOW.0, NAME_WINDOW.1);

    let tail_start = bytes.len().saturating_sub(TAIL_LEN);
    let tail = codec::decode_window(&bytes, tail_start, bytes.len() - tail_start);
    let (days, per_day, amount) = dosage_fields(&tail);

    Some(DrugEntry {
        code,
        name,
        days,
        per_day,
        amount,
    })
}

/// Best-effort dosage recovery from a trailing window.
///
/// Same sub-positions as the tagged layout (days 0-2, frequency at 3,
/// amount from 4) but each field stands alone: a bad field is blanked
/// without invalidating the others.
fn dosage_fields(window: &str) -> (String, String, String) {
    let chars: Vec<char> = window.chars().collect();

    let days_raw: String = chars.iter().take(3).collect();
    let days = days_raw.trim_end().to_string();
    let days = match days.parse::<u32>() {
        Ok(n) if (1..=999).contains(&n) => days,
        _ => String::new(),
    };

    let per_day = match chars.get(3) {
        Some(&c) if c.is_ascii_digit() && c != '0' => c.to_string(),
        _ => String::new(),
    };

    let amount_raw: String = chars.iter().skip(4).take(6).collect();
    let amount = amount_raw.trim_end().to_string();
    let amount = if valid_amount(&amount) {
        amount
    } else {
        String::new()
    };

    (days, per_day, amount)
}

/// Re-split on the delimiter pattern of the oldest files: any two
/// characters followed by a class letter. The matched three characters are
/// the delimiter; the code digits follow it.
fn split_on_class_pattern(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut i = 0;

    while i + 2 < chars.len() {
        if LEGACY_CODE_CLASSES.contains(&chars[i + 2].1) {
            let delim_start = chars[i].0;
            let after = match chars.get(i + 3) {
                Some(&(pos, _)) => pos,
                None => text.len(),
            };
            segments.push(&text[segment_start..delim_start]);
            segment_start = after;
            i += 3;
        } else {
            i += 1;
        }
    }
    segments.push(&text[segment_start..]);
    segments
}
