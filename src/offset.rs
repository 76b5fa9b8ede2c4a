//! Character/byte offset handling for UTF-8 text.
//!
//! # The Two Coordinate Systems
//!
//! Span annotations count positions in **characters** (code points) — the
//! unit annotation tools and evaluation scripts agree on. Rust strings are
//! indexed in **bytes**. The two diverge as soon as the text leaves ASCII:
//!
//! ```text
//! Text: "The café costs €50"
//!
//! CHAR INDEX (what annotations use)
//!   T   h   e       c   a   f   é       c   o   s   t   s       €   5   0
//!   0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15  16  17
//!
//! BYTE INDEX (what &str slicing uses)
//!   T   h   e       c   a   f  [ é ]      c   o   s   t   s      [  €  ]
//!   0   1   2   3   4   5   6   7-8   9  10  11  12  13  14  15  16-17-18 ...
//!                               └2 bytes┘                        └3 bytes┘
//! ```
//!
//! Indexing a `&str` with char offsets either panics (non-boundary) or
//! silently grabs the wrong text. Every slice the decoder and verifier take
//! goes through this module instead.

use std::ops::Range;

/// Length of `text` in characters (code points), the unit spans use.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a half-open character range to the equivalent byte range.
///
/// Offsets at or past the end of the text clamp to `text.len()`.
///
/// # Example
/// ```
/// use iob2::offset::chars_to_bytes;
///
/// let text = "Price €50";
/// // "€50" is chars 6..9 but bytes 6..11 (€ is 3 bytes)
/// assert_eq!(chars_to_bytes(text, 6, 9), (6, 11));
/// ```
#[must_use]
pub fn chars_to_bytes(text: &str, char_start: usize, char_end: usize) -> (usize, usize) {
    let mut byte_start = text.len();
    let mut byte_end = text.len();
    let mut found_start = false;
    let mut found_end = false;

    for (char_idx, (byte_idx, _ch)) in text.char_indices().enumerate() {
        if char_idx == char_start {
            byte_start = byte_idx;
            found_start = true;
        }
        if char_idx == char_end {
            byte_end = byte_idx;
            found_end = true;
        }
        if found_start && found_end {
            break;
        }
    }

    (byte_start, byte_end)
}

/// Slice `text` by a half-open character range.
///
/// Out-of-bounds offsets clamp to the end of the text; an inverted range
/// yields the empty string.
#[must_use]
pub fn slice_chars(text: &str, char_range: Range<usize>) -> &str {
    let (byte_start, byte_end) = chars_to_bytes(text, char_range.start, char_range.end);
    text.get(byte_start..byte_end).unwrap_or("")
}

/// Build a char→byte lookup table for repeated conversions on one text.
///
/// Returns a vec where `map[char_idx]` gives the byte index; the final
/// entry maps `char_len(text)` to `text.len()`.
#[must_use]
pub fn build_char_to_byte_map(text: &str) -> Vec<usize> {
    let char_count = char_len(text);
    let mut map = vec![0usize; char_count + 1];

    for (char_idx, (byte_idx, _ch)) in text.char_indices().enumerate() {
        map[char_idx] = byte_idx;
    }
    map[char_count] = text.len();

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identity() {
        let text = "Hello World";
        assert_eq!(char_len(text), 11);
        assert_eq!(chars_to_bytes(text, 0, 5), (0, 5));
        assert_eq!(slice_chars(text, 6..11), "World");
    }

    #[test]
    fn test_euro_symbol() {
        let text = "Price €50";
        // "Price " = 6 bytes/6 chars, € = 3 bytes/1 char, "50" = 2 bytes/2 chars
        assert_eq!(char_len(text), 9);
        assert_eq!(chars_to_bytes(text, 6, 9), (6, 11));
        assert_eq!(slice_chars(text, 6..9), "€50");
    }

    #[test]
    fn test_cjk() {
        let text = "日本語 test";
        assert_eq!(char_len(text), 8);
        assert_eq!(slice_chars(text, 0..3), "日本語");
        assert_eq!(slice_chars(text, 4..8), "test");
    }

    #[test]
    fn test_out_of_bounds_clamps() {
        let text = "abc";
        assert_eq!(chars_to_bytes(text, 2, 100), (2, 3));
        assert_eq!(slice_chars(text, 5..10), "");
    }

    #[test]
    fn test_empty_range() {
        let text = "test";
        assert_eq!(slice_chars(text, 2..2), "");
    }

    #[test]
    fn test_char_to_byte_map() {
        let text = "a€b";
        let map = build_char_to_byte_map(text);
        assert_eq!(map, vec![0, 1, 4, 5]);
    }
}
