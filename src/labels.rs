//! IOB2 label vocabulary.
//!
//! Maps entity class names to the fixed `{O, B-x, I-x, ...}` label set used
//! for token classification:
//!
//! ```text
//! classes: ["actor", "plot"]
//!
//! index  label
//!   0    O
//!   1    B-ACTOR
//!   2    I-ACTOR
//!   3    B-PLOT
//!   4    I-PLOT
//! ```
//!
//! Index 0 is always `O`; for the class at position `i`, `B` is `2i+1` and
//! `I` is `2i+2`, so the vocabulary always has `2n+1` entries for `n`
//! classes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Label value reserved for special tokens, excluded from loss computation
/// downstream (the PyTorch `ignore_index` convention).
pub const IGNORE_LABEL: i32 = -100;

/// IOB2 tag prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IobPrefix {
    /// Token is outside any entity (`O`).
    Outside,
    /// Token begins an entity (`B-`).
    Beginning,
    /// Token continues an entity (`I-`).
    Inside,
}

/// Immutable bijective mapping between label indices and IOB2 label names.
///
/// Built once per encoder configuration. The caller's class names are kept
/// as given; label strings are uppercased (`B-ACTOR`, not `B-actor`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVocab {
    /// Entity class names in caller order and casing.
    classes: Vec<String>,
}

impl LabelVocab {
    /// Build a vocabulary from an ordered list of entity class names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `classes` is empty or contains
    /// duplicates (compared case-insensitively).
    pub fn new<S: AsRef<str>>(classes: &[S]) -> Result<Self> {
        if classes.is_empty() {
            return Err(Error::config(
                "label vocabulary requires at least one entity class",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for class in classes {
            let class = class.as_ref();
            if !seen.insert(class.to_uppercase()) {
                return Err(Error::config(format!(
                    "duplicate entity class '{class}' (class names are case-insensitive)"
                )));
            }
        }

        Ok(Self {
            classes: classes.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }

    /// Number of labels: `2n + 1` for `n` classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len() * 2 + 1
    }

    /// A vocabulary is never empty (`O` is always present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The configured entity class names, in caller order and casing.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Index of the `O` label (always 0).
    #[must_use]
    pub const fn outside_index(&self) -> i32 {
        0
    }

    /// Index of `B-<CLASS>` for the given class, if configured.
    ///
    /// Class lookup is case-insensitive.
    #[must_use]
    pub fn begin_index(&self, class: &str) -> Option<i32> {
        self.class_position(class).map(|i| (2 * i + 1) as i32)
    }

    /// Index of `I-<CLASS>` for the given class, if configured.
    #[must_use]
    pub fn inside_index(&self, class: &str) -> Option<i32> {
        self.class_position(class).map(|i| (2 * i + 2) as i32)
    }

    /// Label name for an index (`O`, `B-ACTOR`, `I-PLOT`, ...).
    #[must_use]
    pub fn label_name(&self, index: i32) -> Option<String> {
        match self.parse_index(index) {
            Some((IobPrefix::Outside, _)) => Some("O".to_string()),
            Some((IobPrefix::Beginning, class)) => Some(format_entity_label('B', class?)),
            Some((IobPrefix::Inside, class)) => Some(format_entity_label('I', class?)),
            None => None,
        }
    }

    /// Index for a label name (`O`, `B-ACTOR`, ...), case-insensitive.
    #[must_use]
    pub fn label_index(&self, name: &str) -> Option<i32> {
        if name.eq_ignore_ascii_case("O") {
            return Some(0);
        }
        let (prefix, class) = name.split_once('-')?;
        match prefix {
            "B" | "b" => self.begin_index(class),
            "I" | "i" => self.inside_index(class),
            _ => None,
        }
    }

    /// Decompose a label index into its prefix and class name.
    ///
    /// Returns `None` if the index is outside the vocabulary. The class is
    /// `None` only for the `O` label.
    #[must_use]
    pub fn parse_index(&self, index: i32) -> Option<(IobPrefix, Option<&str>)> {
        if index == 0 {
            return Some((IobPrefix::Outside, None));
        }
        if index < 0 || index as usize >= self.len() {
            return None;
        }
        let class = self.classes[(index as usize - 1) / 2].as_str();
        if index % 2 == 1 {
            Some((IobPrefix::Beginning, Some(class)))
        } else {
            Some((IobPrefix::Inside, Some(class)))
        }
    }

    /// All label names in index order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        (0..self.len() as i32)
            .map(|i| self.label_name(i).unwrap_or_default())
            .collect()
    }

    fn class_position(&self, class: &str) -> Option<usize> {
        self.classes
            .iter()
            .position(|c| c.eq_ignore_ascii_case(class))
    }
}

/// Format an entity label string from a prefix character and class name.
///
/// Class names are uppercased: `format_entity_label('B', "actor")` yields
/// `"B-ACTOR"`.
#[must_use]
pub fn format_entity_label(prefix: char, class: &str) -> String {
    format!("{prefix}-{}", class.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_layout() {
        let vocab = LabelVocab::new(&["actor", "character", "plot"]).unwrap();
        assert_eq!(vocab.len(), 7);
        assert_eq!(vocab.outside_index(), 0);
        assert_eq!(vocab.begin_index("actor"), Some(1));
        assert_eq!(vocab.inside_index("actor"), Some(2));
        assert_eq!(vocab.begin_index("character"), Some(3));
        assert_eq!(vocab.inside_index("character"), Some(4));
        assert_eq!(vocab.begin_index("plot"), Some(5));
        assert_eq!(vocab.inside_index("plot"), Some(6));
    }

    #[test]
    fn test_label_names_uppercased() {
        let vocab = LabelVocab::new(&["actor"]).unwrap();
        assert_eq!(vocab.label_name(0).as_deref(), Some("O"));
        assert_eq!(vocab.label_name(1).as_deref(), Some("B-ACTOR"));
        assert_eq!(vocab.label_name(2).as_deref(), Some("I-ACTOR"));
        assert_eq!(vocab.label_name(3), None);
        assert_eq!(vocab.label_name(-1), None);
        assert_eq!(vocab.label_name(IGNORE_LABEL), None);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let vocab = LabelVocab::new(&["Actor"]).unwrap();
        assert_eq!(vocab.begin_index("ACTOR"), Some(1));
        assert_eq!(vocab.begin_index("actor"), Some(1));
        assert_eq!(vocab.label_index("b-actor"), Some(1));
        assert_eq!(vocab.label_index("I-ACTOR"), Some(2));
        assert_eq!(vocab.label_index("O"), Some(0));
        assert_eq!(vocab.label_index("E-ACTOR"), None);
    }

    #[test]
    fn test_empty_classes_rejected() {
        let err = LabelVocab::new(&[] as &[&str]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        let err = LabelVocab::new(&["actor", "ACTOR"]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_index() {
        let vocab = LabelVocab::new(&["actor", "plot"]).unwrap();
        assert_eq!(vocab.parse_index(0), Some((IobPrefix::Outside, None)));
        assert_eq!(
            vocab.parse_index(1),
            Some((IobPrefix::Beginning, Some("actor")))
        );
        assert_eq!(vocab.parse_index(4), Some((IobPrefix::Inside, Some("plot"))));
        assert_eq!(vocab.parse_index(5), None);
        assert_eq!(vocab.parse_index(IGNORE_LABEL), None);
    }

    #[test]
    fn test_names_roundtrip() {
        let vocab = LabelVocab::new(&["actor", "plot"]).unwrap();
        for (i, name) in vocab.names().iter().enumerate() {
            assert_eq!(vocab.label_index(name), Some(i as i32));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Vocabulary size law: 2n + 1 entries for n distinct classes.
        #[test]
        fn size_law(n in 1usize..20) {
            let classes: Vec<String> = (0..n).map(|i| format!("class{i}")).collect();
            let vocab = LabelVocab::new(&classes).unwrap();
            prop_assert_eq!(vocab.len(), 2 * n + 1);
            let name = vocab.label_name(0);
            prop_assert_eq!(name.as_deref(), Some("O"));
        }

        /// Every index round-trips through its label name.
        #[test]
        fn index_name_bijection(n in 1usize..10) {
            let classes: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            let vocab = LabelVocab::new(&classes).unwrap();
            for idx in 0..vocab.len() as i32 {
                let name = vocab.label_name(idx).unwrap();
                prop_assert_eq!(vocab.label_index(&name), Some(idx));
            }
        }
    }
}
