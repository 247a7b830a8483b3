//! Patient header decoding
//!
//! The first 77 bytes of every record hold the patient fields at fixed
//! byte positions. Extraction never fails: a short or garbled record
//! degrades to empty fields so a bad header cannot take sibling records
//! down with it.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::codec;

/// Field positions as (byte offset, byte length)
pub mod layout {
    pub const CODE: (usize, usize) = (0, 10);
    pub const NAME: (usize, usize) = (10, 20);
    pub const BIRTH_DATE: (usize, usize) = (30, 8);
    pub const SEX_CODE: (usize, usize) = (38, 1);
    pub const PRESCRIBED_DATE: (usize, usize) = (39, 8);
    pub const SEQUENCE: (usize, usize) = (47, 2);
    pub const HOSPITAL_CODE: (usize, usize) = (49, 8);
    pub const DOCTOR: (usize, usize) = (57, 20);
}

/// One decoded patient header plus derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub code: String,
    pub name: String,
    /// 8-digit `YYYYMMDD`, as found in the file
    pub birth_date: String,
    pub sex_code: String,
    /// Derived from the sex code, see [`sex_label`]
    pub sex_label: String,
    /// Whole years as of the parse date; 0 when the birth date is not an
    /// 8-character string
    pub age: u32,
    /// Raw prescription date (`YYYYMMDD`)
    pub prescribed_date: String,
    /// `YYYY-MM-DD`, or `""` when the raw date is not 8 characters
    pub prescribed_date_formatted: String,
    pub sequence: String,
    pub hospital_code: String,
    pub doctor: String,
    /// Source-file serial (file stem), shared by all records of a file
    pub preserial: String,
}

impl Patient {
    /// Decode the patient fields of one record.
    pub fn decode(record: &[u8], preserial: &str) -> Self {
        let field = |(offset, len)| codec::extract_field(record, offset, len);

        let birth_date = field(layout::BIRTH_DATE);
        let sex_code = field(layout::SEX_CODE);
        let prescribed_date = field(layout::PRESCRIBED_DATE);

        Self {
            code: field(layout::CODE),
            name: field(layout::NAME),
            sex_label: sex_label(&sex_code).to_string(),
            age: age_on(&birth_date, Local::now().date_naive()),
            prescribed_date_formatted: format_date(&prescribed_date),
            sequence: field(layout::SEQUENCE),
            hospital_code: field(layout::HOSPITAL_CODE),
            doctor: field(layout::DOCTOR),
            preserial: preserial.to_string(),
            birth_date,
            sex_code,
            prescribed_date,
        }
    }
}

/// Sex label for a sex code.
///
/// The producer writes "1" for male and everything else, including blank,
/// collapses to the female label. Faithful to the source convention; there
/// is no unknown state.
pub fn sex_label(code: &str) -> &'static str {
    if code == "1" {
        "남"
    } else {
        "여"
    }
}

/// Whole-year age for an 8-digit `YYYYMMDD` birth date on a given day.
///
/// Decrements by one when the month/day has not yet come around. Returns 0
/// for anything that is not an 8-character numeric date, and for birth
/// dates in the future.
pub fn age_on(birth_date: &str, today: NaiveDate) -> u32 {
    // ASCII check up front: the slices below are byte positions
    if birth_date.len() != 8 || !birth_date.is_ascii() {
        return 0;
    }
    let Ok(year) = birth_date[..4].parse::<i32>() else {
        return 0;
    };
    let Ok(month) = birth_date[4..6].parse::<u32>() else {
        return 0;
    };
    let Ok(day) = birth_date[6..8].parse::<u32>() else {
        return 0;
    };

    let mut age = today.year() - year;
    if (today.month(), today.day()) < (month, day) {
        age -= 1;
    }
    age.max(0) as u32
}

/// `YYYYMMDD` → `YYYY-MM-DD`; `""` unless the input is exactly 8 chars.
pub fn format_date(raw: &str) -> String {
    if raw.len() != 8 || !raw.is_ascii() {
        return String::new();
    }
    format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8])
}
