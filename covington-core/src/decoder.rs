//! Decoder loop: drives one sentence from the initial to a terminal configuration

use crate::configuration::Configuration;
use crate::error::{ParseError, Result};
use crate::moves::Move;
use crate::oracle::{CovingtonOracle, Oracle};
use crate::scorer::{Learner, NoopLearner, ScoredMove, Scorer, TrainingSignal};
use crate::sentence::Sentence;
use crate::vocabulary::Vocabulary;
use tracing::{debug, trace};

/// Which move is applied when the scorer disagrees with the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrainingPolicy {
    /// Apply the best-scoring zero-cost move
    #[default]
    TeacherForcing,
    /// Apply the scorer's own pick and let the oracle recover from it
    Exploration,
}

/// Summary of one parsed sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOutcome {
    /// Moves applied
    pub moves: usize,
    /// Arcs in the terminal configuration
    pub arcs: usize,
    /// Steps where the scorer's pick was not zero-cost (train mode only)
    pub mismatches: usize,
}

/// Runs the transition system over sentences
#[derive(Debug, Clone)]
pub struct Decoder<'v, O = CovingtonOracle> {
    vocab: &'v Vocabulary,
    oracle: O,
}

impl<'v> Decoder<'v> {
    /// Decoder with the default oracle
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self::with_oracle(vocab, CovingtonOracle)
    }
}

impl<'v, O: Oracle> Decoder<'v, O> {
    /// Decoder with a custom oracle
    pub fn with_oracle(vocab: &'v Vocabulary, oracle: O) -> Self {
        Self { vocab, oracle }
    }

    /// Label vocabulary the decoder enumerates arc moves over
    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocab
    }

    /// Parse with the scorer's arg-max at every step and write the
    /// predictions onto the sentence
    pub fn decode<S>(&self, sentence: &mut Sentence, scorer: &S) -> Result<ParseOutcome>
    where
        S: Scorer + ?Sized,
    {
        self.run::<S, NoopLearner>(sentence, scorer, None)
    }

    /// Parse in train mode, reporting scorer/oracle disagreements to `learner`
    pub fn train<S, L>(
        &self,
        sentence: &mut Sentence,
        scorer: &S,
        learner: &mut L,
        policy: TrainingPolicy,
    ) -> Result<ParseOutcome>
    where
        S: Scorer + ?Sized,
        L: Learner + ?Sized,
    {
        self.run(sentence, scorer, Some((learner, policy)))
    }

    /// Apply an externally chosen move sequence, then write the predictions.
    ///
    /// Fails on the first move whose preconditions do not hold, or if the
    /// sequence stops before a terminal configuration.
    pub fn replay<I>(&self, sentence: &mut Sentence, moves: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = Move>,
    {
        let mut config = Configuration::initial(sentence);
        for mv in moves {
            config = config.apply(mv)?;
        }
        if !config.is_terminal() {
            return Err(ParseError::IllegalMove {
                step: config.steps(),
                mv: "<end of sequence>".to_string(),
                reason: "configuration is not terminal".to_string(),
            });
        }
        self.finish(sentence, &config, 0)
    }

    fn run<S, L>(
        &self,
        sentence: &mut Sentence,
        scorer: &S,
        mut training: Option<(&mut L, TrainingPolicy)>,
    ) -> Result<ParseOutcome>
    where
        S: Scorer + ?Sized,
        L: Learner + ?Sized,
    {
        let mut config = Configuration::initial(sentence);
        let mut mismatches = 0;

        while !config.is_terminal() {
            let step = config.steps();
            debug_assert!(step < Configuration::move_bound(sentence.len()));

            let legal = config.legal_moves(self.vocab);
            let predicted = best(sentence, &config, scorer, &legal)
                .ok_or(ParseError::DeadEnd { step })?;

            let chosen = match training.as_mut() {
                None => predicted.mv,
                Some((learner, policy)) => {
                    let zero_cost = self.oracle.zero_cost(sentence, &config, self.vocab)?;
                    for mv in &zero_cost {
                        if let Some(violation) = config.violation(mv) {
                            return Err(ParseError::IllegalMove {
                                step,
                                mv: mv.describe(self.vocab)?,
                                reason: format!("oracle proposed it but {violation}"),
                            });
                        }
                    }
                    let gold = best(sentence, &config, scorer, &zero_cost)
                        .ok_or(ParseError::DeadEnd { step })?;

                    if zero_cost.contains(&predicted.mv) {
                        predicted.mv
                    } else {
                        mismatches += 1;
                        let signal = TrainingSignal {
                            step,
                            predicted,
                            gold,
                            zero_cost,
                        };
                        learner.observe(sentence, &config, &signal);
                        match policy {
                            TrainingPolicy::TeacherForcing => gold.mv,
                            TrainingPolicy::Exploration => predicted.mv,
                        }
                    }
                }
            };

            trace!(step, config = %config, mv = %chosen, "applying move");
            config = config.apply(chosen)?;
        }

        self.finish(sentence, &config, mismatches)
    }

    fn finish(
        &self,
        sentence: &mut Sentence,
        config: &Configuration,
        mismatches: usize,
    ) -> Result<ParseOutcome> {
        sentence.apply_arcs(config.arcs(), self.vocab)?;
        let outcome = ParseOutcome {
            moves: config.steps(),
            arcs: config.arcs().len(),
            mismatches,
        };
        debug!(
            words = sentence.len(),
            moves = outcome.moves,
            arcs = outcome.arcs,
            mismatches = outcome.mismatches,
            "sentence parsed"
        );
        Ok(outcome)
    }
}

/// Arg-max over candidates; ties keep the earlier candidate
fn best<S>(
    sentence: &Sentence,
    config: &Configuration,
    scorer: &S,
    candidates: &[Move],
) -> Option<ScoredMove>
where
    S: Scorer + ?Sized,
{
    let mut best: Option<ScoredMove> = None;
    for &mv in candidates {
        let mut score = scorer.score(sentence, config, &mv);
        if score.is_nan() {
            score = f64::NEG_INFINITY;
        }
        match best {
            Some(current) if current.score >= score => {}
            _ => best = Some(ScoredMove { mv, score }),
        }
    }
    best
}
