//! Label-sequence decoding: IOB2 labels back to character spans.
//!
//! Inverts the encoder: scan the label sequence, group contiguous
//! same-class token runs (a `B-` start plus a maximal `I-` run), and emit
//! one [`Span`] per run. Token ranges pass through the boundary corrector
//! first, so tokenizers that absorb a preceding space into a token still
//! decode to exact entity boundaries.
//!
//! Decoding must survive noisy model predictions, not just well-formed
//! encoder output. The state machine therefore gives orphaned `I-` tags
//! (an inside tag with no matching `B-` before it) the same
//! entity-opening semantics as `B-` instead of dropping them.

use crate::annotation::Span;
use crate::labels::{IobPrefix, LabelVocab};
use crate::offset::slice_chars;
use crate::tokenizer::Token;
use crate::{Error, Result};
use std::ops::Range;

/// Trim whitespace off both ends of a token's raw character range.
///
/// Some tokenizers report a token's range as including a leading separator
/// absorbed into the token (byte-level BPE word markers fold in the
/// preceding space). The trim inspects the text's actual characters at the
/// offsets, so multi-space gaps and non-space whitespace are handled too.
/// Applied uniformly at decode time; a no-op for tokenizers that already
/// report exact boundaries, and idempotent.
///
/// An empty input range (or a range that trims to empty) is returned
/// unchanged.
#[must_use]
pub fn correct_boundaries(raw: Range<usize>, text: &str) -> Range<usize> {
    if raw.start >= raw.end {
        return raw;
    }

    let piece = slice_chars(text, raw.clone());
    let leading = piece.chars().take_while(|c| c.is_whitespace()).count();
    let trailing = piece
        .chars()
        .rev()
        .take_while(|c| c.is_whitespace())
        .count();

    let start = raw.start + leading;
    let end = raw.end - trailing;
    if start >= end {
        // Whole token is whitespace; leave the range alone.
        return raw;
    }
    start..end
}

/// Decode an IOB2 label sequence into character spans.
///
/// `labels` and `tokens` must be the tokenizer's output for `text`, one
/// label per token. Positions holding `ignore_label` (special tokens) never
/// open or extend an entity; like `O`, they close any open run. Recovered
/// class names are lowercased, matching the caller-facing class-name
/// convention.
///
/// # Errors
///
/// - [`Error::Alignment`] if `labels` and `tokens` differ in length.
/// - [`Error::LabelIndex`] if a label value is neither `ignore_label` nor
///   a vocabulary index.
pub fn decode_labels(
    vocab: &LabelVocab,
    ignore_label: i32,
    labels: &[i32],
    tokens: &[Token],
    text: &str,
) -> Result<Vec<Span>> {
    if labels.len() != tokens.len() {
        return Err(Error::alignment(format!(
            "label sequence length ({}) does not match token count ({})",
            labels.len(),
            tokens.len()
        )));
    }

    let mut spans = Vec::new();
    // Open entity: (class name, corrected start, corrected end so far).
    let mut open: Option<(String, usize, usize)> = None;

    for (position, (&label, token)) in labels.iter().zip(tokens).enumerate() {
        if label == ignore_label {
            close(&mut open, &mut spans);
            continue;
        }

        let (prefix, class) = vocab.parse_index(label).ok_or(Error::LabelIndex {
            value: label,
            position,
            vocab_size: vocab.len(),
        })?;

        // A labeled token without a (nonempty) range cannot anchor a span
        // boundary.
        let Some(raw) = token.range.clone().filter(|r| r.start < r.end) else {
            close(&mut open, &mut spans);
            continue;
        };
        let corrected = correct_boundaries(raw, text);

        match prefix {
            IobPrefix::Outside => close(&mut open, &mut spans),
            IobPrefix::Beginning => {
                close(&mut open, &mut spans);
                let class = class.unwrap_or_default().to_lowercase();
                open = Some((class, corrected.start, corrected.end));
            }
            IobPrefix::Inside => {
                let class = class.unwrap_or_default().to_lowercase();
                match open {
                    Some((ref open_class, _, ref mut end)) if *open_class == class => {
                        *end = corrected.end;
                    }
                    _ => {
                        // Orphaned I- tag: model predictions are not
                        // guaranteed well-formed, so it opens an entity.
                        close(&mut open, &mut spans);
                        open = Some((class, corrected.start, corrected.end));
                    }
                }
            }
        }
    }
    close(&mut open, &mut spans);

    Ok(spans)
}

fn close(open: &mut Option<(String, usize, usize)>, spans: &mut Vec<Span>) {
    if let Some((label, start, end)) = open.take() {
        spans.push(Span { start, end, label });
    }
}
