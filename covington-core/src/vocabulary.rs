//! Relation label vocabulary
//!
//! Built once, then shared read-only. Insertion order doubles as the
//! tie-break order between equally scored arc moves.

use crate::error::{ParseError, Result};
use crate::sentence::Sentence;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense index of a label inside a [`Vocabulary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelId(u32);

impl LabelId {
    /// Position of the label in vocabulary order
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw numeric id
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of relation labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct Vocabulary {
    labels: Vec<String>,
    index: HashMap<String, LabelId>,
}

impl Vocabulary {
    /// Build from labels, keeping the first occurrence of each
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for label in labels {
            vocab.insert(label.as_ref());
        }
        vocab
    }

    /// Collect the gold labels of a corpus in first-seen order
    pub fn from_sentences<'a, I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        let mut vocab = Self::default();
        for sentence in sentences {
            for token in sentence.words() {
                if let Some(label) = &token.gold_label {
                    vocab.insert(label);
                }
            }
        }
        vocab
    }

    fn insert(&mut self, label: &str) {
        if self.index.contains_key(label) {
            return;
        }
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
    }

    /// Look up the id of a label
    pub fn id(&self, label: &str) -> Option<LabelId> {
        self.index.get(label).copied()
    }

    /// Look up the id of a label, failing on unknown labels
    pub fn require(&self, label: &str) -> Result<LabelId> {
        self.id(label)
            .ok_or_else(|| ParseError::UnknownLabel(label.to_string()))
    }

    /// Label text for an id
    pub fn label(&self, id: LabelId) -> Result<&str> {
        self.labels
            .get(id.index())
            .map(String::as_str)
            .ok_or(ParseError::UnknownLabelId(id.as_u32()))
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Ids in vocabulary order
    pub fn ids(&self) -> impl Iterator<Item = LabelId> + '_ {
        (0..self.labels.len() as u32).map(LabelId)
    }

    /// `(id, label)` pairs in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (LabelId(i as u32), label.as_str()))
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_dedup() {
        let vocab = Vocabulary::from_labels(["nsubj", "obj", "nsubj", "det"]);
        assert_eq!(vocab.len(), 3);
        let labels: Vec<&str> = vocab.iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["nsubj", "obj", "det"]);
        assert_eq!(vocab.id("obj").map(LabelId::index), Some(1));
    }

    #[test]
    fn test_lookup_failures() {
        let vocab = Vocabulary::from_labels(["nsubj"]);
        assert_eq!(
            vocab.require("amod"),
            Err(ParseError::UnknownLabel("amod".into()))
        );
        let foreign = Vocabulary::from_labels(["a", "b", "c"]).id("c").unwrap();
        assert_eq!(vocab.label(foreign), Err(ParseError::UnknownLabelId(2)));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.ids().count(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_label_list() {
        let vocab = Vocabulary::from_labels(["nsubj", "obj"]);
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["nsubj","obj"]"#);
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }
}
