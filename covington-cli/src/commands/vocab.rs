//! Vocab command implementation

use super::{load_inputs, CommonArgs};
use anyhow::Result;
use clap::Args;
use covington_core::Vocabulary;
use std::io::{self, Write};

/// Arguments for the vocab command
#[derive(Debug, Args)]
pub struct VocabArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Listing format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: VocabFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// How labels are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VocabFormat {
    /// One label per line
    Text,
    /// JSON array
    Json,
}

impl VocabArgs {
    /// Execute the vocab command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();

        let corpora = load_inputs(&self.input, self.common.quiet)?;
        let vocab = Vocabulary::from_sentences(corpora.iter().flat_map(|c| &c.sentences));
        log::info!("{} label(s) found", vocab.len());

        let mut out = io::stdout().lock();
        write_vocabulary(&mut out, &vocab, self.format)?;
        out.flush()?;
        Ok(())
    }
}

/// Print labels in vocabulary order
pub fn write_vocabulary<W: Write>(out: &mut W, vocab: &Vocabulary, format: VocabFormat) -> Result<()> {
    match format {
        VocabFormat::Text => {
            for (_, label) in vocab.iter() {
                writeln!(out, "{label}")?;
            }
        }
        VocabFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, vocab)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing_keeps_order() {
        let vocab = Vocabulary::from_labels(["nsubj", "root", "obj"]);
        let mut out = Vec::new();
        write_vocabulary(&mut out, &vocab, VocabFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "nsubj\nroot\nobj\n");
    }

    #[test]
    fn test_json_listing() {
        let vocab = Vocabulary::from_labels(["det", "root"]);
        let mut out = Vec::new();
        write_vocabulary(&mut out, &vocab, VocabFormat::Json).unwrap();
        let labels: Vec<String> = serde_json::from_slice(&out).unwrap();
        assert_eq!(labels, vec!["det", "root"]);
    }
}
