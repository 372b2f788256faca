//! Epoch driver for train-mode decoding
//!
//! Training is sequential: the learner is updated after every sentence and
//! the next sentence is scored with the updated model.

use crate::config::TrainingConfig;
use crate::report::{EpochReport, SentenceFailure};
use covington_core::{Decoder, Learner, Scorer, Sentence};
use tracing::{info, warn};

/// Runs training epochs over a corpus
#[derive(Debug, Clone)]
pub struct Trainer<'v> {
    decoder: Decoder<'v>,
    config: TrainingConfig,
}

impl<'v> Trainer<'v> {
    /// Create a trainer
    pub fn new(decoder: Decoder<'v>, config: TrainingConfig) -> Self {
        Self { decoder, config }
    }

    /// The epoch schedule
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on every sentence once. `epoch` counts from 1 and selects the
    /// training policy. Failing sentences are reported and skipped.
    pub fn run_epoch<S, L>(
        &self,
        epoch: usize,
        sentences: &mut [Sentence],
        scorer: &S,
        learner: &mut L,
    ) -> EpochReport
    where
        S: Scorer + ?Sized,
        L: Learner + ?Sized,
    {
        let policy = self.config.policy_for(epoch);
        let mut report = EpochReport {
            epoch,
            policy,
            sentences: 0,
            failures: Vec::new(),
            moves: 0,
            mismatches: 0,
        };

        for (index, sentence) in sentences.iter_mut().enumerate() {
            match self.decoder.train(sentence, scorer, learner, policy) {
                Ok(outcome) => {
                    report.sentences += 1;
                    report.moves += outcome.moves;
                    report.mismatches += outcome.mismatches;
                }
                Err(error) => {
                    warn!(epoch, index, %error, "skipping sentence");
                    sentence.clear_predictions();
                    report.failures.push(SentenceFailure { index, error });
                }
            }
        }

        info!(
            epoch,
            ?policy,
            sentences = report.sentences,
            failed = report.failures.len(),
            mismatches = report.mismatches,
            "epoch finished"
        );
        report
    }

    /// Run every configured epoch in turn
    pub fn run<S, L>(
        &self,
        sentences: &mut [Sentence],
        scorer: &S,
        learner: &mut L,
    ) -> Vec<EpochReport>
    where
        S: Scorer + ?Sized,
        L: Learner + ?Sized,
    {
        (1..=self.config.epochs)
            .map(|epoch| self.run_epoch(epoch, sentences, scorer, learner))
            .collect()
    }
}
