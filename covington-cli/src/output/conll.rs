//! CoNLL output formatter

use super::OutputFormatter;
use anyhow::Result;
use covington_core::Sentence;
use covington_engine::write_sentence;
use std::io::Write;

/// Writes sentences as they arrive, one CoNLL block each
pub struct ConllFormatter<W: Write> {
    writer: W,
}

impl<W: Write> ConllFormatter<W> {
    /// Create a new CoNLL formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for ConllFormatter<W> {
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()> {
        write_sentence(&mut self.writer, sentence)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
