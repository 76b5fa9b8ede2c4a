//! Span annotations and their validator.
//!
//! A [`Span`] is a half-open character range `[start, end)` into a specific
//! text, tagged with an entity class. An [`Annotation`] bundles a text with
//! its spans and is only constructed through [`Annotation::validate`], which
//! fail-fasts on the geometry mistakes that would otherwise surface later as
//! silent misalignment: negative offsets, inverted or zero-width ranges,
//! out-of-bounds ends, and overlapping spans.

use crate::offset::char_len;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A character-offset entity annotation.
///
/// `start`/`end` count **characters** (code points), not bytes, and form a
/// half-open range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Index of the entity's first character.
    pub start: usize,
    /// Index one past the entity's last character.
    pub end: usize,
    /// Entity class name (e.g., `"actor"`, `"PERSON"`).
    pub label: String,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Check if this span's range intersects another's.
    ///
    /// Adjacent spans (`self.end == other.start`) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A text with validated, non-overlapping entity spans.
///
/// Construct via [`Annotation::validate`]; the fields are read-only
/// afterwards from the crate's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The raw text the spans index into.
    pub text: String,
    /// Validated entity spans. Not necessarily sorted.
    pub spans: Vec<Span>,
}

impl Annotation {
    /// Validate spans against a text and build an [`Annotation`].
    ///
    /// Checks, in order, reporting the first violation with the offending
    /// span's index and field values:
    ///
    /// 1. no inverted or zero-width spans (`start < end`),
    /// 2. `end` within the text (measured in characters),
    /// 3. no two spans overlap (exact duplicates included; touching
    ///    boundaries are fine).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the rule and span index that
    /// triggered it.
    pub fn validate(text: impl Into<String>, spans: Vec<Span>) -> Result<Self> {
        let text = text.into();
        let text_len = char_len(&text);

        for (i, span) in spans.iter().enumerate() {
            if span.start >= span.end {
                return Err(Error::validation(format!(
                    "span {i} ('{}') has start ({}) >= end ({}); start must be strictly less than end",
                    span.label, span.start, span.end
                )));
            }
            if span.end > text_len {
                return Err(Error::validation(format!(
                    "span {i} ('{}') extends past the text (end={}, text length={text_len}); \
                     character offsets must lie within the text",
                    span.label, span.end
                )));
            }
        }

        // Overlap check: sort by (start, end), then compare neighbors.
        if spans.len() > 1 {
            let mut order: Vec<usize> = (0..spans.len()).collect();
            order.sort_by_key(|&i| (spans[i].start, spans[i].end));
            for pair in order.windows(2) {
                let (i, j) = (pair[0], pair[1]);
                let (prev, curr) = (&spans[i], &spans[j]);
                if curr.start < prev.end {
                    return Err(Error::validation(format!(
                        "spans {i} ('{}', {}:{}) and {j} ('{}', {}:{}) overlap; \
                         IOB2 encoding does not support overlapping entities",
                        prev.label, prev.start, prev.end, curr.label, curr.start, curr.end
                    )));
                }
            }
        }

        Ok(Self { text, spans })
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        char_len(&self.text)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Overlap is symmetric.
        #[test]
        fn overlap_symmetric(s1 in 0usize..50, l1 in 1usize..20, s2 in 0usize..50, l2 in 1usize..20) {
            let a = Span::new(s1, s1 + l1, "a");
            let b = Span::new(s2, s2 + l2, "b");
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        /// Any two spans that overlap must fail validation, in either order.
        #[test]
        fn overlapping_pairs_rejected(s1 in 0usize..20, l1 in 1usize..10, s2 in 0usize..20, l2 in 1usize..10) {
            let a = Span::new(s1, s1 + l1, "a");
            let b = Span::new(s2, s2 + l2, "b");
            let text = "x".repeat(40);
            let result = Annotation::validate(text, vec![a.clone(), b.clone()]);
            if a.overlaps(&b) {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
