//! Sequential execution strategy

use crate::executor::{run_one, ExecutionMode, Executor, SentenceResults};
use covington_core::{ParseOutcome, Sentence};

/// Single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run_all<F>(&self, sentences: &mut [Sentence], job: F) -> SentenceResults
    where
        F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome> + Sync,
    {
        sentences
            .iter_mut()
            .map(|sentence| run_one(sentence, &job))
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
