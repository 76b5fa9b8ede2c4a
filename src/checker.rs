//! Round-trip verification: encode, decode, compare.
//!
//! Encoding is easy to get silently wrong — a tokenizer with an unusual
//! boundary convention, or an annotation whose entity boundary falls
//! mid-token, produces a label sequence that *looks* fine but decodes to
//! the wrong characters. The checker is the correctness oracle: decode the
//! labels against the same tokens and require the recovered spans to equal
//! the original annotation, so misalignment surfaces at data-preparation
//! time instead of as a mysteriously low F1 score later.

use crate::annotation::Annotation;
use crate::decoder::correct_boundaries;
use crate::encoder::Iob2Encoder;
use crate::offset::slice_chars;
use crate::tokenizer::Token;
use crate::{Error, Result};

/// Verify that a label sequence decodes back to the original annotation.
///
/// Spans are compared as sets of `(start, end, class)` triples, after
/// whitespace-trim normalization on both sides and with class names
/// compared case-insensitively. Any mismatch — missing entity, spurious
/// entity, or shifted boundary — fails with a diagnostic naming the first
/// divergent entity with its expected vs. recovered range and text slice.
///
/// # Errors
///
/// [`Error::Alignment`] on any divergence; decode errors propagate.
pub fn check_conversion(
    encoder: &Iob2Encoder,
    annotation: &Annotation,
    labels: &[i32],
    tokens: &[Token],
) -> Result<()> {
    let text = &annotation.text;
    let recovered = encoder.decode(labels, tokens, text)?;

    // Normalize both sides: whitespace-trimmed range + lowercased class.
    let normalize = |spans: &[crate::Span]| -> Vec<(usize, usize, String)> {
        let mut triples: Vec<_> = spans
            .iter()
            .map(|s| {
                let r = correct_boundaries(s.start..s.end, text);
                (r.start, r.end, s.label.to_lowercase())
            })
            .collect();
        triples.sort();
        triples
    };

    let expected = normalize(&annotation.spans);
    let actual = normalize(&recovered);

    if expected.len() != actual.len() {
        return Err(Error::alignment(format!(
            "round-trip recovered {} entities but the annotation has {}; \
             expected {expected:?}, recovered {actual:?}",
            actual.len(),
            expected.len()
        )));
    }

    for (exp, act) in expected.iter().zip(&actual) {
        if exp != act {
            return Err(Error::alignment(format!(
                "round-trip mismatch: expected {} '{}' at [{}, {}), recovered {} '{}' at [{}, {})",
                exp.2,
                slice_chars(text, exp.0..exp.1),
                exp.0,
                exp.1,
                act.2,
                slice_chars(text, act.0..act.1),
                act.0,
                act.1
            )));
        }
    }

    Ok(())
}
