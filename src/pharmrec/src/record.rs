//! Record splitting
//!
//! One dispensing record per line. Splitting runs on the raw byte buffer:
//! line breaks are ASCII and can never appear inside a double-byte
//! sequence of this code page, so no decoding is needed here. Records are
//! not trimmed: leading pad spaces are field content and every patient
//! field offset is relative to the line start.

/// Split a file buffer into record lines, skipping blank and
/// whitespace-only lines. Order is preserved; the iterator borrows the
/// buffer and can be recreated at will.
pub fn split_records(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_blank_lines() {
        let data = b"first\n\n   \nsecond\r\n\t\nthird";
        let records: Vec<_> = split_records(data).collect();
        assert_eq!(records, [b"first".as_ref(), b"second", b"third"]);
    }

    #[test]
    fn test_split_preserves_leading_padding() {
        let data = b"  padded record\nnext";
        let records: Vec<_> = split_records(data).collect();
        assert_eq!(records[0], b"  padded record");
    }

    #[test]
    fn test_split_strips_carriage_return_only() {
        let data = b"one\r\ntwo\r";
        let records: Vec<_> = split_records(data).collect();
        assert_eq!(records, [b"one".as_ref(), b"two"]);
    }

    #[test]
    fn test_split_restartable() {
        let data = b"a\nb";
        assert_eq!(split_records(data).count(), 2);
        assert_eq!(split_records(data).count(), 2);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_records(b"").count(), 0);
        assert_eq!(split_records(b"\r\n\r\n").count(), 0);
    }
}
