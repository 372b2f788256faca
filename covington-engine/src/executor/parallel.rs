//! Parallel execution strategy
//!
//! Sentences are independent, so a batch is split across a dedicated rayon
//! pool and results are collected back in input order.

use crate::{
    error::{EngineError, Result},
    executor::{run_one, ExecutionMode, Executor, SentenceResults},
};
use covington_core::{ParseOutcome, Sentence};
use rayon::prelude::*;
use std::sync::Arc;

/// Multi-threaded executor backed by its own thread pool
#[derive(Debug, Clone)]
pub struct ParallelExecutor {
    pool: Arc<rayon::ThreadPool>,
}

impl ParallelExecutor {
    /// Create an executor with `threads` workers (None = one per logical CPU)
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("covington-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Number of worker threads
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ParallelExecutor {
    fn run_all<F>(&self, sentences: &mut [Sentence], job: F) -> SentenceResults
    where
        F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome> + Sync,
    {
        self.pool.install(|| {
            sentences
                .par_iter_mut()
                .map(|sentence| run_one(sentence, &job))
                .collect()
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SequentialExecutor;
    use covington_core::{Decoder, OracleScorer, Token, Vocabulary};

    fn chain(words: usize) -> Sentence {
        let tokens = (1..=words)
            .map(|id| {
                let head = if id == words { 0 } else { id + 1 };
                let label = if head == 0 { "root" } else { "dep" };
                Token::new(id, format!("w{id}")).with_gold(head, label)
            })
            .collect();
        Sentence::new(tokens).unwrap()
    }

    #[test]
    fn test_thread_count_is_respected() {
        let executor = ParallelExecutor::new(Some(3)).unwrap();
        assert_eq!(executor.thread_count(), 3);
        assert_eq!(executor.mode(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vocab = Vocabulary::from_labels(["root", "dep"]);
        let decoder = Decoder::new(&vocab);
        let scorer = OracleScorer::new(&vocab);

        let mut left: Vec<Sentence> = (1..20).map(chain).collect();
        let mut right = left.clone();

        let seq = SequentialExecutor.decode_all(&decoder, &mut left, &scorer);
        let par = ParallelExecutor::new(Some(4))
            .unwrap()
            .decode_all(&decoder, &mut right, &scorer);

        assert_eq!(seq, par);
        assert_eq!(left, right);
    }
}
