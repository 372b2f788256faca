//! Gold-consistent move selection
//!
//! The oracle reads the gold arcs of a sentence and returns the moves that
//! neither create a wrong arc nor foreclose a reachable gold one. It stays
//! usable after mistakes: a gold arc that is no longer legal (its dependent
//! was already given a wrong head, or it would close a cycle with wrong arcs)
//! is treated as lost and the oracle falls through to the next rule.

use crate::configuration::Configuration;
use crate::error::{ParseError, Result};
use crate::moves::{Move, MoveSet};
use crate::sentence::Sentence;
use crate::vocabulary::{LabelId, Vocabulary};
use smallvec::smallvec;

/// Computes zero-cost moves for a configuration
pub trait Oracle: Send + Sync {
    /// Zero-cost moves at `config`; empty only for terminal configurations
    fn zero_cost(
        &self,
        sentence: &Sentence,
        config: &Configuration,
        vocab: &Vocabulary,
    ) -> Result<MoveSet>;

    /// Whether `mv` is among the zero-cost moves at `config`
    fn is_zero_cost(
        &self,
        sentence: &Sentence,
        config: &Configuration,
        vocab: &Vocabulary,
        mv: &Move,
    ) -> Result<bool> {
        Ok(self.zero_cost(sentence, config, vocab)?.contains(mv))
    }
}

/// Oracle for the list-based non-projective transition system
#[derive(Debug, Clone, Copy, Default)]
pub struct CovingtonOracle;

impl CovingtonOracle {
    /// Create the oracle
    pub fn new() -> Self {
        Self
    }
}

impl Oracle for CovingtonOracle {
    fn zero_cost(
        &self,
        sentence: &Sentence,
        config: &Configuration,
        vocab: &Vocabulary,
    ) -> Result<MoveSet> {
        if config.is_terminal() {
            return Ok(MoveSet::new());
        }

        if let (Some(l), Some(b)) = (config.l(), config.b()) {
            if sentence.gold_head(l) == Some(b) {
                let mv = Move::LeftArc(gold_label(sentence, l, vocab)?);
                if config.is_legal(&mv) {
                    return Ok(smallvec![mv]);
                }
            }
            if sentence.gold_head(b) == Some(l) {
                let mv = Move::RightArc(gold_label(sentence, b, vocab)?);
                if config.is_legal(&mv) {
                    return Ok(smallvec![mv]);
                }
            }
        }

        if config.l().is_some() {
            Ok(smallvec![Move::NoArc])
        } else {
            Ok(smallvec![Move::Shift])
        }
    }
}

fn gold_label(sentence: &Sentence, id: usize, vocab: &Vocabulary) -> Result<LabelId> {
    let label = sentence.gold_label(id).ok_or_else(|| {
        ParseError::malformed(format!("token {id} has a gold head but no gold label"))
    })?;
    vocab.require(label)
}
