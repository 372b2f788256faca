//! Seams to the learned model: move scoring and training feedback
//!
//! The decoder never looks inside a scorer. It asks for one score per legal
//! candidate per step and, in train mode, reports every disagreement between
//! the scorer's pick and the oracle to a [`Learner`].

use crate::configuration::Configuration;
use crate::moves::{Move, MoveSet};
use crate::oracle::{CovingtonOracle, Oracle};
use crate::sentence::Sentence;
use crate::vocabulary::Vocabulary;

/// Scores a candidate move at a configuration
pub trait Scorer {
    /// Real-valued score; higher is better. NaN ranks below every number.
    fn score(&self, sentence: &Sentence, config: &Configuration, mv: &Move) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&Sentence, &Configuration, &Move) -> f64,
{
    fn score(&self, sentence: &Sentence, config: &Configuration, mv: &Move) -> f64 {
        self(sentence, config, mv)
    }
}

/// Ranks the oracle's zero-cost moves above everything else
///
/// Useful for replaying gold trees through the decoder. A score cannot carry
/// an error, so oracle failures (unknown or missing gold labels) rank every
/// move at `-inf`. Drive it through [`Decoder::train`] with teacher forcing
/// to have those failures abort the sentence instead.
///
/// [`Decoder::train`]: crate::decoder::Decoder::train
#[derive(Debug, Clone)]
pub struct OracleScorer<'v, O = CovingtonOracle> {
    vocab: &'v Vocabulary,
    oracle: O,
}

impl<'v> OracleScorer<'v> {
    /// Oracle scorer using [`CovingtonOracle`]
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self::with_oracle(vocab, CovingtonOracle)
    }
}

impl<'v, O: Oracle> OracleScorer<'v, O> {
    /// Oracle scorer over a custom oracle
    pub fn with_oracle(vocab: &'v Vocabulary, oracle: O) -> Self {
        Self { vocab, oracle }
    }
}

impl<O: Oracle> Scorer for OracleScorer<'_, O> {
    fn score(&self, sentence: &Sentence, config: &Configuration, mv: &Move) -> f64 {
        match self.oracle.is_zero_cost(sentence, config, self.vocab, mv) {
            Ok(true) => 1.0,
            Ok(false) => 0.0,
            Err(_) => f64::NEG_INFINITY,
        }
    }
}

/// A move together with the score it received
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    /// The move
    pub mv: Move,
    /// Its score
    pub score: f64,
}

/// Disagreement between the scorer and the oracle at one step
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSignal {
    /// Decoder step
    pub step: usize,
    /// Scorer's arg-max among legal moves
    pub predicted: ScoredMove,
    /// Best-scoring zero-cost move
    pub gold: ScoredMove,
    /// Every zero-cost move at this step
    pub zero_cost: MoveSet,
}

/// Receives training signals from the decoder
pub trait Learner {
    /// Called once per step where the scorer's pick is not zero-cost
    fn observe(&mut self, sentence: &Sentence, config: &Configuration, signal: &TrainingSignal);
}

/// Learner that discards every signal
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLearner;

impl Learner for NoopLearner {
    fn observe(&mut self, _: &Sentence, _: &Configuration, _: &TrainingSignal) {}
}

/// Learner that keeps every signal, mostly for inspection and tests
#[derive(Debug, Clone, Default)]
pub struct SignalRecorder {
    /// Signals in the order they were observed
    pub signals: Vec<TrainingSignal>,
}

impl Learner for SignalRecorder {
    fn observe(&mut self, _: &Sentence, _: &Configuration, signal: &TrainingSignal) {
        self.signals.push(signal.clone());
    }
}
