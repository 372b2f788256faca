//! Output formatting module

use anyhow::Result;
use covington_core::Sentence;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Emit one parsed sentence
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod conll;
pub mod json;

pub use conll::ConllFormatter;
pub use json::JsonFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ten-column CoNLL with predicted heads and labels
    #[default]
    Conll,
    /// JSON array of sentences with gold and predicted attachments
    Json,
}

/// Formatter for `format` writing to `writer`
pub fn create_formatter<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Conll => Box::new(ConllFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}
