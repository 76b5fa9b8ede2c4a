//! The external-tokenizer boundary.
//!
//! The alignment core never defines a real tokenizer. It consumes any
//! tokenizer through the minimal [`Tokenize`] capability: an ordered token
//! sequence where each token either carries a half-open **character** range
//! into the input text, or is a special token (sequence markers, padding)
//! with no range at all.
//!
//! Two reference tokenizers live here for tests and examples:
//!
//! - [`WordTokenizer`] reports exact word boundaries, the way WordPiece
//!   offset mappings do.
//! - [`SpaceAbsorbingTokenizer`] folds the preceding space into each
//!   token's range, the way byte-level BPE tokenizers (RoBERTa-style `Ġ`
//!   markers) report offsets. Decoding against it exercises the boundary
//!   corrector.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An atomic tokenizer output unit, positioned in character space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Half-open character range into the source text. `None` for special
    /// tokens.
    pub range: Option<Range<usize>>,
    /// Whether this is a special token (`[CLS]`, `[SEP]`, padding, ...).
    pub special: bool,
}

impl Token {
    /// A content token covering `start..end` in character offsets.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            range: Some(start..end),
            special: false,
        }
    }

    /// A special token with no text range.
    #[must_use]
    pub const fn special() -> Self {
        Self {
            range: None,
            special: true,
        }
    }
}

/// Capability interface for an external tokenizer.
///
/// Implementations must be deterministic: the same text always yields the
/// same token sequence with the same character ranges.
pub trait Tokenize {
    /// Tokenize `text` into an ordered token sequence.
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Find the content token whose character range contains `char_idx`.
///
/// This is the projection HuggingFace calls `char_to_token`. Special tokens
/// never match. Returns `None` when the character falls between tokens
/// (e.g., whitespace) or beyond a truncation boundary.
#[must_use]
pub fn char_to_token(tokens: &[Token], char_idx: usize) -> Option<usize> {
    tokens.iter().position(|t| {
        t.range
            .as_ref()
            .is_some_and(|r| r.start <= char_idx && char_idx < r.end)
    })
}

/// Reference tokenizer with exact word boundaries.
///
/// Splits on whitespace, then splits leading/trailing punctuation off each
/// word. Optionally wraps the sequence in special start/end markers and
/// truncates to a maximum length, modeling the shape of transformer
/// tokenizer output without any subword vocabulary.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    /// Emit a special token before and after the content tokens.
    pub add_special_tokens: bool,
    /// Truncate output (specials included) to this many tokens.
    pub max_length: Option<usize>,
}

impl WordTokenizer {
    /// Tokenizer with special markers, no truncation.
    #[must_use]
    pub fn with_specials() -> Self {
        Self {
            add_special_tokens: true,
            max_length: None,
        }
    }

    /// Tokenizer with special markers and a maximum sequence length.
    #[must_use]
    pub fn truncated(max_length: usize) -> Self {
        Self {
            add_special_tokens: true,
            max_length: Some(max_length),
        }
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        if self.add_special_tokens {
            tokens.push(Token::special());
        }
        tokens.extend(word_ranges(text).into_iter().map(|r| Token::new(r.start, r.end)));
        if self.add_special_tokens {
            tokens.push(Token::special());
        }
        if let Some(max) = self.max_length {
            tokens.truncate(max);
            // Keep the trailing marker inside the window, as tokenizers do.
            if self.add_special_tokens && tokens.len() == max && max > 0 {
                tokens[max - 1] = Token::special();
            }
        }
        tokens
    }
}

/// Reference tokenizer that absorbs the preceding space into each token.
///
/// A token for `"Queen"` preceded by a space reports a range one character
/// left of the true word start. Exact-boundary decoding against this
/// tokenizer is wrong by one character unless the boundary corrector trims
/// the whitespace back off.
#[derive(Debug, Clone, Default)]
pub struct SpaceAbsorbingTokenizer {
    /// Emit a special token before and after the content tokens.
    pub add_special_tokens: bool,
}

impl SpaceAbsorbingTokenizer {
    /// Tokenizer with special markers.
    #[must_use]
    pub fn with_specials() -> Self {
        Self {
            add_special_tokens: true,
        }
    }
}

impl Tokenize for SpaceAbsorbingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        if self.add_special_tokens {
            tokens.push(Token::special());
        }
        let chars: Vec<char> = text.chars().collect();
        for r in word_ranges(text) {
            // Fold exactly one preceding space into the range, mirroring
            // byte-level BPE offset conventions.
            let start = if r.start > 0 && chars[r.start - 1] == ' ' {
                r.start - 1
            } else {
                r.start
            };
            tokens.push(Token::new(start, r.end));
        }
        if self.add_special_tokens {
            tokens.push(Token::special());
        }
        tokens
    }
}

/// Character ranges of word-level pieces: alphanumeric runs and single
/// punctuation marks.
fn word_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.chars().enumerate() {
        if ch.is_alphanumeric() || ch == '\'' {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else {
            if let Some(start) = run_start.take() {
                ranges.push(start..i);
            }
            if !ch.is_whitespace() {
                ranges.push(i..i + 1);
            }
        }
    }
    if let Some(start) = run_start {
        ranges.push(start..text.chars().count());
    }

    ranges
}
