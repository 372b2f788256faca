//! Batch, epoch and accuracy reports

use crate::executor::ExecutionMode;
use covington_core::{ParseError, Sentence, TrainingPolicy};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A sentence that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceFailure {
    /// Position of the sentence in its batch
    pub index: usize,
    /// Why it failed
    pub error: ParseError,
}

impl fmt::Display for SentenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentence {}: {}", self.index, self.error)
    }
}

/// Outcome of decoding one batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Sentences parsed successfully
    pub parsed: usize,
    /// Sentences that failed, in input order
    pub failures: Vec<SentenceFailure>,
    /// Moves applied across successful sentences
    pub moves: usize,
    /// Arcs built across successful sentences
    pub arcs: usize,
    /// Sentences repaired by single-root post-processing
    pub rerooted: usize,
    /// Mode the batch actually ran in
    pub mode: ExecutionMode,
    /// Wall-clock time
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of failed sentences
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether every sentence parsed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of one training epoch
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// Epoch number, from 1
    pub epoch: usize,
    /// Policy used throughout the epoch
    pub policy: TrainingPolicy,
    /// Sentences trained on successfully
    pub sentences: usize,
    /// Sentences that failed
    pub failures: Vec<SentenceFailure>,
    /// Moves applied
    pub moves: usize,
    /// Steps where the scorer disagreed with the oracle
    pub mismatches: usize,
}

impl EpochReport {
    /// Fraction of applied moves where the scorer was wrong
    pub fn mismatch_rate(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.mismatches as f64 / self.moves as f64
        }
    }
}

/// Unlabelled and labelled attachment scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttachmentScores {
    /// Tokens with a gold head
    pub tokens: usize,
    /// Tokens whose predicted head is the gold head
    pub correct_heads: usize,
    /// Tokens whose predicted head and label are both gold
    pub correct_labeled: usize,
}

impl AttachmentScores {
    /// Score predictions against gold annotation; tokens without a gold head are ignored
    pub fn compute(sentences: &[Sentence]) -> Self {
        let mut scores = Self::default();
        for sentence in sentences {
            scores.add(sentence);
        }
        scores
    }

    /// Accumulate one more sentence
    pub fn add(&mut self, sentence: &Sentence) {
        for token in sentence.words() {
            let Some(gold_head) = token.gold_head else {
                continue;
            };
            self.tokens += 1;
            if token.pred_head == gold_head {
                self.correct_heads += 1;
                if token.gold_label.as_deref() == Some(token.pred_label.as_str()) {
                    self.correct_labeled += 1;
                }
            }
        }
    }

    /// Unlabelled attachment score in `[0, 1]`
    pub fn uas(&self) -> f64 {
        ratio(self.correct_heads, self.tokens)
    }

    /// Labelled attachment score in `[0, 1]`
    pub fn las(&self) -> f64 {
        ratio(self.correct_labeled, self.tokens)
    }
}

impl fmt::Display for AttachmentScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UAS {:.2}% LAS {:.2}% over {} tokens",
            self.uas() * 100.0,
            self.las() * 100.0,
            self.tokens
        )
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
