//! Execution strategies for decoding batches of sentences

use covington_core::{Decoder, ParseOutcome, Scorer, Sentence};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One sentence after another on the calling thread
    Sequential,
    /// Sentences spread over a rayon thread pool
    Parallel,
    /// Pick per batch from its size
    #[default]
    Adaptive,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Adaptive => "adaptive",
        })
    }
}

/// Per-sentence results in input order
pub type SentenceResults = Vec<covington_core::Result<ParseOutcome>>;

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Run `job` on every sentence; a failure is recorded in place and never
    /// stops the batch
    fn run_all<F>(&self, sentences: &mut [Sentence], job: F) -> SentenceResults
    where
        F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome> + Sync;

    /// Decode every sentence with the scorer's arg-max
    fn decode_all<S>(
        &self,
        decoder: &Decoder<'_>,
        sentences: &mut [Sentence],
        scorer: &S,
    ) -> SentenceResults
    where
        S: Scorer + Sync + ?Sized,
    {
        self.run_all(sentences, |sentence| decoder.decode(sentence, scorer))
    }

    /// The execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Choose a concrete mode for a batch of `batch_len` sentences
pub fn auto_select(batch_len: usize, threshold: usize) -> ExecutionMode {
    if batch_len < 2 || batch_len < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

/// Run one job, leaving root attachments behind if it fails
pub(crate) fn run_one<F>(sentence: &mut Sentence, job: &F) -> covington_core::Result<ParseOutcome>
where
    F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome>,
{
    let result = job(sentence);
    if result.is_err() {
        sentence.clear_predictions();
    }
    result
}
