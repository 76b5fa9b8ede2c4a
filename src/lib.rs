//! # iob2
//!
//! Span ↔ IOB2 label alignment for NER training data.
//!
//! Converts character-offset entity annotations into per-token IOB2 label
//! sequences aligned to tokenizer output, and predicted label sequences
//! back into character spans.
//!
//! ```text
//! Text:   "Did Dame Judy Dench star in a British film ..."
//! Spans:  actor: [4, 19)      plot: [30, 37)
//!
//!              ┌ encode ───────────────────────────────────────┐
//!              │                                               ▼
//! Tokens: [CLS]   Did   Dame      Judy      Dench     star   ...
//! Labels: -100     O    B-ACTOR   I-ACTOR   I-ACTOR    O     ...
//!              ▲                                               │
//!              └──────────────────────────────────── decode ───┘
//! ```
//!
//! The hard part is the bidirectional mapping between the text's
//! **character-offset** coordinate space and the tokenizer's **token-index**
//! coordinate space. Tokenizer families disagree on boundary conventions —
//! byte-level BPE tokenizers absorb the preceding space into a token's
//! reported range — so decoding runs every token boundary through a
//! whitespace-trimming corrector, and a round-trip verifier re-decodes each
//! encoded sequence to catch silent misalignment for any tokenizer, known
//! or unknown.
//!
//! ## Quick Start
//!
//! ```rust
//! use iob2::{Iob2Encoder, Span, WordTokenizer};
//!
//! let encoder = Iob2Encoder::new(&["actor", "character", "plot"])?;
//! let tokenizer = WordTokenizer::with_specials();
//!
//! let text = "Did Dame Judy Dench star in a British film about Queen Elizabeth?";
//! let spans = vec![
//!     Span::new(4, 19, "actor"),
//!     Span::new(30, 37, "plot"),
//!     Span::new(49, 64, "character"),
//! ];
//!
//! let labels = encoder.encode_text(text, spans.clone(), &tokenizer)?;
//! let recovered = encoder.decode_text(&labels, text, &tokenizer)?;
//! assert_eq!(recovered, spans);
//! # Ok::<(), iob2::Error>(())
//! ```
//!
//! ## Design
//!
//! - **External tokenizer as opaque capability**: the core depends only on
//!   the [`Tokenize`] trait — ordered tokens with optional character ranges
//!   plus a special flag — so word-piece, byte-level, and
//!   sentencepiece-style tokenizers all plug in unchanged.
//! - **Correction over family detection**: the whitespace trim runs on
//!   every token boundary at decode time. It is a no-op for tokenizers with
//!   exact boundaries, so no tokenizer-family branching exists anywhere.
//! - **Stateless, reentrant core**: an [`Iob2Encoder`] is an immutable
//!   configuration value; encode/decode/verify are pure functions of their
//!   inputs and safe to share across threads without coordination.
//! - **Fail loudly on data problems**: span geometry violations and
//!   round-trip divergence are surfaced with span indices, ranges, and text
//!   slices — never swallowed, because they indicate training-data
//!   integrity bugs.

#![warn(missing_docs)]

pub mod annotation;
pub mod checker;
pub mod decoder;
mod error;
pub mod encoder;
pub mod labels;
pub mod offset;
pub mod schema;
pub mod tokenizer;

pub use annotation::{Annotation, Span};
pub use checker::check_conversion;
pub use decoder::{correct_boundaries, decode_labels};
pub use encoder::{ErrorPolicy, Iob2Encoder};
pub use error::{Error, Result};
pub use labels::{format_entity_label, IobPrefix, LabelVocab, IGNORE_LABEL};
pub use schema::{parse_annotation, parse_batch, FieldMap};
pub use tokenizer::{char_to_token, SpaceAbsorbingTokenizer, Token, Tokenize, WordTokenizer};
