//! Span-to-IOB2 encoding.
//!
//! [`Iob2Encoder`] projects validated character spans onto tokenizer output,
//! producing one `i32` label per token:
//!
//! ```text
//! Text:    "Did Dame Judy Dench star ..."
//! Spans:   actor: [4, 19)
//!
//! Tokens:  [CLS]  Did   Dame     Judy     Dench    star  ...  [SEP]
//! Labels:  -100    O    B-ACTOR  I-ACTOR  I-ACTOR   O    ...  -100
//! ```
//!
//! Special tokens receive the ignore value so downstream loss computation
//! skips them. Entities that fall entirely beyond a truncation boundary are
//! silently dropped — a documented information loss, not a fault.

use crate::annotation::{Annotation, Span};
use crate::checker::check_conversion;
use crate::decoder::decode_labels;
use crate::labels::{LabelVocab, IGNORE_LABEL};
use crate::tokenizer::{char_to_token, Token, Tokenize};
use crate::{Error, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Error handling strategy for batch encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the whole batch on the first item error.
    #[default]
    Raise,
    /// Skip failed items and return results for the rest.
    Skip,
}

/// Converts span annotations into IOB2 label sequences aligned to tokenizer
/// output, and back.
///
/// The encoder is an immutable configuration value: label vocabulary,
/// ignore value, and whether to run the round-trip check after each encode.
/// All operations are pure functions of their inputs, so one encoder can be
/// shared freely across threads.
///
/// # Example
///
/// ```
/// use iob2::{Iob2Encoder, Span, WordTokenizer};
///
/// let encoder = Iob2Encoder::new(&["actor"]).unwrap();
/// let tokenizer = WordTokenizer::with_specials();
///
/// let labels = encoder
///     .encode_text("Matt Damon stars", vec![Span::new(0, 10, "actor")], &tokenizer)
///     .unwrap();
/// // [CLS] Matt Damon stars [SEP]
/// assert_eq!(labels, vec![-100, 1, 2, 0, -100]);
/// ```
#[derive(Debug, Clone)]
pub struct Iob2Encoder {
    vocab: LabelVocab,
    ignore_label: i32,
    conversion_check: bool,
}

impl Iob2Encoder {
    /// Create an encoder for the given entity classes.
    ///
    /// The round-trip conversion check is enabled by default and the ignore
    /// value is [`IGNORE_LABEL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty or duplicated class list.
    pub fn new<S: AsRef<str>>(classes: &[S]) -> Result<Self> {
        Ok(Self {
            vocab: LabelVocab::new(classes)?,
            ignore_label: IGNORE_LABEL,
            conversion_check: true,
        })
    }

    /// Use a different ignore value for special-token positions.
    #[must_use]
    pub fn with_ignore_label(mut self, ignore_label: i32) -> Self {
        self.ignore_label = ignore_label;
        self
    }

    /// Enable or disable the automatic round-trip check after encoding.
    #[must_use]
    pub fn with_conversion_check(mut self, enabled: bool) -> Self {
        self.conversion_check = enabled;
        self
    }

    /// The label vocabulary this encoder was configured with.
    #[must_use]
    pub fn vocab(&self) -> &LabelVocab {
        &self.vocab
    }

    /// The ignore value used for special-token positions.
    #[must_use]
    pub const fn ignore_label(&self) -> i32 {
        self.ignore_label
    }

    /// Encode a validated annotation against tokenizer output for its text.
    ///
    /// The output has exactly one label per token: the ignore value for
    /// special tokens, an entity label for tokens covered by a span, `O`
    /// everywhere else. A span whose characters map to no token (beyond a
    /// truncation boundary) is dropped silently.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a span references a class the vocabulary does
    ///   not contain (checked for every span before any label is written).
    /// - [`Error::Alignment`] if the conversion check is enabled and the
    ///   decoded spans diverge from the originals.
    pub fn encode(&self, annotation: &Annotation, tokens: &[Token]) -> Result<Vec<i32>> {
        // Unknown classes are configuration errors and surface before any
        // encoding occurs, truncated or not.
        let indices: Vec<(i32, i32)> = annotation
            .spans
            .iter()
            .map(|span| {
                let b = self.vocab.begin_index(&span.label);
                let i = self.vocab.inside_index(&span.label);
                b.zip(i).ok_or_else(|| {
                    Error::config(format!(
                        "span class '{}' is not in the label vocabulary (classes: {:?})",
                        span.label,
                        self.vocab.classes()
                    ))
                })
            })
            .collect::<Result<_>>()?;

        let mut labels: Vec<i32> = tokens
            .iter()
            .map(|t| {
                if t.special {
                    self.ignore_label
                } else {
                    self.vocab.outside_index()
                }
            })
            .collect();

        for (span, &(b_ent, i_ent)) in annotation.spans.iter().zip(&indices) {
            let token_start = char_to_token(tokens, span.start);
            let token_end = char_to_token(tokens, span.end - 1);

            let (Some(token_start), Some(token_end)) = (token_start, token_end) else {
                debug!(
                    start = span.start,
                    end = span.end,
                    label = %span.label,
                    "span maps to no token (beyond truncation boundary), dropping"
                );
                continue;
            };

            labels[token_start] = b_ent;
            for label in labels
                .iter_mut()
                .take(token_end + 1)
                .skip(token_start + 1)
            {
                *label = i_ent;
            }
        }

        if self.conversion_check {
            check_conversion(self, annotation, &labels, tokens)?;
        }

        Ok(labels)
    }

    /// Validate, tokenize, and encode in one call.
    ///
    /// # Errors
    ///
    /// Propagates validation failures from [`Annotation::validate`] and
    /// everything [`Self::encode`] can raise.
    pub fn encode_text(
        &self,
        text: impl Into<String>,
        spans: Vec<Span>,
        tokenizer: &impl Tokenize,
    ) -> Result<Vec<i32>> {
        let annotation = Annotation::validate(text, spans)?;
        let tokens = tokenizer.tokenize(&annotation.text);
        self.encode(&annotation, &tokens)
    }

    /// Encode a batch of annotations, tokenizing in parallel.
    ///
    /// With [`ErrorPolicy::Raise`] the first failing item aborts the batch;
    /// with [`ErrorPolicy::Skip`] failing items are logged and dropped from
    /// the output.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::Raise`], any per-item error.
    pub fn encode_batch(
        &self,
        annotations: &[Annotation],
        tokenizer: &(impl Tokenize + Sync),
        on_error: ErrorPolicy,
    ) -> Result<Vec<Vec<i32>>> {
        let results: Vec<Result<Vec<i32>>> = annotations
            .par_iter()
            .map(|annotation| {
                let tokens = tokenizer.tokenize(&annotation.text);
                self.encode(annotation, &tokens)
            })
            .collect();

        match on_error {
            ErrorPolicy::Raise => results.into_iter().collect(),
            ErrorPolicy::Skip => Ok(results
                .into_iter()
                .enumerate()
                .filter_map(|(i, result)| match result {
                    Ok(labels) => Some(labels),
                    Err(err) => {
                        warn!(item = i, error = %err, "skipping annotation");
                        None
                    }
                })
                .collect()),
        }
    }

    /// Decode a label sequence back into character spans.
    ///
    /// See [`decode_labels`] for the state-machine semantics.
    ///
    /// # Errors
    ///
    /// [`Error::Alignment`] on a length mismatch, [`Error::LabelIndex`] for
    /// label values outside the vocabulary.
    pub fn decode(&self, labels: &[i32], tokens: &[Token], text: &str) -> Result<Vec<Span>> {
        decode_labels(&self.vocab, self.ignore_label, labels, tokens, text)
    }

    /// Re-tokenize `text` and decode a label sequence against it.
    ///
    /// Tokenization is deterministic by contract, so this recovers the same
    /// token ranges the labels were produced against.
    ///
    /// # Errors
    ///
    /// Same as [`Self::decode`].
    pub fn decode_text(
        &self,
        labels: &[i32],
        text: &str,
        tokenizer: &impl Tokenize,
    ) -> Result<Vec<Span>> {
        let tokens = tokenizer.tokenize(text);
        self.decode(labels, &tokens, text)
    }
}
