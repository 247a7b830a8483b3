//! Byte-offset field extraction for the legacy code page
//!
//! All field positions in the file format are byte offsets into the
//! ks_c_5601-1987 buffer. Decoding happens per field, after slicing; the
//! buffer is never decoded first and indexed by character, which would
//! shift every position past the first Hangul glyph.

use std::borrow::Cow;

use encoding_rs::EUC_KR;

/// Decode a whole buffer, failing on any malformed sequence.
///
/// Used for the whole-file validity check and wherever a record must
/// decode cleanly before text-level scanning.
pub fn decode(data: &[u8]) -> Option<String> {
    EUC_KR
        .decode_without_bom_handling_and_without_replacement(data)
        .map(Cow::into_owned)
}

/// Decode a buffer, substituting replacement characters for bad sequences.
pub fn decode_lossy(data: &[u8]) -> String {
    EUC_KR.decode(data).0.into_owned()
}

/// Re-encode decoded text back into the legacy code page.
pub fn encode(text: &str) -> Vec<u8> {
    EUC_KR.encode(text).0.into_owned()
}

/// Decode the field at an exact byte range, trimmed of surrounding
/// whitespace.
///
/// Returns `""` when the range falls outside the buffer (the format pads
/// short lines) or when the slice is malformed, e.g. a window boundary
/// that split a double-byte sequence. Neither case is an error.
pub fn extract_field(data: &[u8], offset: usize, len: usize) -> String {
    decode_window(data, offset, len).trim().to_string()
}

/// Decode a byte window without trimming.
///
/// Sub-fields inside dosage windows live at fixed positions, so leading
/// padding must survive. Same out-of-bounds and malformed-slice behavior
/// as [`extract_field`].
pub(crate) fn decode_window(data: &[u8], offset: usize, len: usize) -> String {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => decode(&data[offset..end]).unwrap_or_default(),
        _ => String::new(),
    }
}
