//! Oracle command implementation
//!
//! Replays the gold tree of every sentence through the decoder, writes the
//! resulting predictions and reports attachment scores. On a well-formed
//! corpus the scores are 100%; anything lower points at gold annotation the
//! transition system cannot reproduce.

use super::{load_inputs, CommonArgs};
use crate::output::{create_formatter, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use covington_engine::{AttachmentScores, DependencyParser, ExecutionMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the oracle command
#[derive(Debug, Args)]
pub struct OracleArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else conll)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep a single dependent of the root in every sentence
    #[arg(long)]
    pub single_root: bool,

    /// Force parallel decoding even for small batches
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel decoding
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl OracleArgs {
    /// Execute the oracle command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();
        log::debug!("Arguments: {:?}", self);

        let config = self.common.load_config()?;
        let mut engine = config.engine.clone();
        if self.single_root {
            engine.single_root = true;
        }
        if self.parallel {
            engine.execution_mode = ExecutionMode::Parallel;
        }
        if self.threads.is_some() {
            engine.threads = self.threads;
        }
        let format = self.format.unwrap_or(config.output.format);

        let corpora = load_inputs(&self.input, self.common.quiet)?;
        let rejected: usize = corpora.iter().map(|c| c.rejected.len()).sum();
        let mut sentences: Vec<_> = corpora.into_iter().flat_map(|c| c.sentences).collect();

        let parser = DependencyParser::builder()
            .labels_from(&sentences)
            .config(engine)
            .build()
            .context("Failed to set up the parser")?;
        log::info!(
            "Replaying {} sentence(s) over {} label(s)",
            sentences.len(),
            parser.vocabulary().len()
        );
        let report = parser.parse_oracle(&mut sentences);

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        for sentence in &sentences {
            formatter.format_sentence(sentence)?;
        }
        formatter.finish()?;

        let scores = AttachmentScores::compute(&sentences);
        if !self.common.quiet {
            eprintln!(
                "{} sentence(s) parsed, {} failed, {} rejected ({} mode, {:.1?})",
                report.parsed,
                report.failed(),
                rejected,
                report.mode,
                report.elapsed
            );
            eprintln!("{scores}");
        }
        Ok(())
    }
}
