//! Batch parser and builder

use crate::{
    config::EngineConfig,
    error::Result,
    executor::{auto_select, ExecutionMode, Executor, SentenceResults, SequentialExecutor},
    postprocess::enforce_single_root,
    report::{BatchReport, SentenceFailure},
    trainer::Trainer,
};
use covington_core::{
    Decoder, NoopLearner, OracleScorer, ParseOutcome, Scorer, Sentence, TrainingPolicy, Vocabulary,
};
use std::time::Instant;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Decodes batches of sentences with a fixed label vocabulary
///
/// The parser owns the vocabulary and the engine configuration; the scorer
/// is supplied per call so one parser can serve several models.
#[derive(Debug)]
pub struct DependencyParser {
    vocab: Vocabulary,
    config: EngineConfig,
    #[cfg(feature = "parallel")]
    parallel: Option<ParallelExecutor>,
}

impl DependencyParser {
    /// Parser with the default configuration
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        Self::with_config(vocab, EngineConfig::default())
    }

    /// Parser with a custom configuration
    pub fn with_config(vocab: Vocabulary, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let parallel = match config.execution_mode {
            ExecutionMode::Sequential => None,
            ExecutionMode::Parallel | ExecutionMode::Adaptive => {
                Some(ParallelExecutor::new(config.threads)?)
            }
        };

        Ok(Self {
            vocab,
            config,
            #[cfg(feature = "parallel")]
            parallel,
        })
    }

    /// Start a builder
    pub fn builder() -> DependencyParserBuilder {
        DependencyParserBuilder::new()
    }

    /// Label vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decoder over this parser's vocabulary
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.vocab)
    }

    /// Trainer using this parser's vocabulary and epoch schedule
    pub fn trainer(&self) -> Trainer<'_> {
        Trainer::new(self.decoder(), self.config.training.clone())
    }

    /// Decode a single sentence, applying post-processing
    pub fn parse_sentence<S>(&self, sentence: &mut Sentence, scorer: &S) -> Result<ParseOutcome>
    where
        S: Scorer + ?Sized,
    {
        let outcome = self.decoder().decode(sentence, scorer)?;
        if self.config.single_root {
            enforce_single_root(sentence);
        }
        Ok(outcome)
    }

    /// Decode a batch with the configured execution mode
    pub fn parse_batch<S>(&self, sentences: &mut [Sentence], scorer: &S) -> BatchReport
    where
        S: Scorer + Sync + ?Sized,
    {
        self.parse_with_mode(sentences, scorer, self.config.execution_mode)
    }

    /// Decode a batch with an explicit execution mode
    pub fn parse_with_mode<S>(
        &self,
        sentences: &mut [Sentence],
        scorer: &S,
        mode: ExecutionMode,
    ) -> BatchReport
    where
        S: Scorer + Sync + ?Sized,
    {
        let decoder = self.decoder();
        self.run_batch(sentences, mode, |sentence| decoder.decode(sentence, scorer))
    }

    /// Replay the gold trees through the decoder
    ///
    /// Moves come from the oracle, so a sentence whose gold annotation the
    /// oracle cannot read (a relation missing from the vocabulary, a head
    /// without a relation) fails instead of parsing into a wrong tree.
    /// Tokens with no gold head stay on the root.
    pub fn parse_oracle(&self, sentences: &mut [Sentence]) -> BatchReport {
        let decoder = self.decoder();
        let scorer = OracleScorer::new(&self.vocab);
        self.run_batch(sentences, self.config.execution_mode, |sentence| {
            decoder.train(
                sentence,
                &scorer,
                &mut NoopLearner,
                TrainingPolicy::TeacherForcing,
            )
        })
    }

    fn run_batch<F>(&self, sentences: &mut [Sentence], mode: ExecutionMode, job: F) -> BatchReport
    where
        F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome> + Sync,
    {
        let start = Instant::now();
        let mode = match mode {
            ExecutionMode::Adaptive => auto_select(sentences.len(), self.config.parallel_threshold),
            concrete => concrete,
        };

        let (results, mode) = self.dispatch(mode, sentences, job);

        let mut report = BatchReport {
            parsed: 0,
            failures: Vec::new(),
            moves: 0,
            arcs: 0,
            rerooted: 0,
            mode,
            elapsed: Default::default(),
        };
        for (index, (sentence, result)) in sentences.iter_mut().zip(results).enumerate() {
            match result {
                Ok(outcome) => {
                    report.parsed += 1;
                    report.moves += outcome.moves;
                    report.arcs += outcome.arcs;
                    if self.config.single_root && enforce_single_root(sentence).is_some() {
                        report.rerooted += 1;
                    }
                }
                Err(error) => {
                    warn!(index, %error, "sentence failed");
                    report.failures.push(SentenceFailure { index, error });
                }
            }
        }
        report.elapsed = start.elapsed();

        info!(
            %mode,
            parsed = report.parsed,
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch decoded"
        );
        report
    }

    fn dispatch<F>(
        &self,
        mode: ExecutionMode,
        sentences: &mut [Sentence],
        job: F,
    ) -> (SentenceResults, ExecutionMode)
    where
        F: Fn(&mut Sentence) -> covington_core::Result<ParseOutcome> + Sync,
    {
        #[cfg(feature = "parallel")]
        if mode == ExecutionMode::Parallel {
            if let Some(executor) = &self.parallel {
                debug!(threads = executor.thread_count(), "parallel batch");
                return (executor.run_all(sentences, job), ExecutionMode::Parallel);
            }
        }

        if mode == ExecutionMode::Parallel {
            warn!("no thread pool available, decoding sequentially");
        }
        debug!(sentences = sentences.len(), "sequential batch");
        (
            SequentialExecutor.run_all(sentences, job),
            ExecutionMode::Sequential,
        )
    }
}

/// Builder for [`DependencyParser`]
#[derive(Debug, Default)]
pub struct DependencyParserBuilder {
    vocab: Vocabulary,
    config: EngineConfig,
}

impl DependencyParserBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label vocabulary
    pub fn vocabulary(mut self, vocab: Vocabulary) -> Self {
        self.vocab = vocab;
        self
    }

    /// Collect the label vocabulary from gold annotation
    pub fn labels_from<'a, I>(mut self, sentences: I) -> Self
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        self.vocab = Vocabulary::from_sentences(sentences);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.threads = count;
        self
    }

    /// Set the adaptive threshold in sentences
    pub fn parallel_threshold(mut self, sentences: usize) -> Self {
        self.config.parallel_threshold = sentences;
        self
    }

    /// Enable or disable single-root repair
    pub fn single_root(mut self, enabled: bool) -> Self {
        self.config.single_root = enabled;
        self
    }

    /// Build the parser
    pub fn build(self) -> Result<DependencyParser> {
        DependencyParser::with_config(self.vocab, self.config)
    }
}
