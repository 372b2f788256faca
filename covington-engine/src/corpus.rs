//! CoNLL-X / CoNLL-U corpus reading and writing
//!
//! Only the first eight columns are read: id, form, lemma, coarse tag, fine
//! tag, features, head and relation. Comment lines, multiword ranges (`3-4`)
//! and empty nodes (`5.1`) are skipped, so ids of the remaining rows must run
//! `1..=n`. Output always has ten columns with the predicted head and
//! relation in columns seven and eight.

use crate::error::{EngineError, Result};
use covington_core::{Sentence, Token};
use regex::Regex;
use std::io::{BufRead, Lines, Write};
use tracing::{debug, trace};

/// Forms matching this are folded to [`NUMBER_FORM`]
pub const DEFAULT_NUMBER_PATTERN: &str = r"^(?:[0-9]+|[0-9]+\.[0-9]+|[0-9]+[0-9,]+)";

/// Normalised form shared by all numbers
pub const NUMBER_FORM: &str = "NUM";

const MIN_COLUMNS: usize = 8;

/// Builds the `norm` field of tokens read from a corpus
///
/// Only the form is normalised. Lemmas are kept as written so the lemma
/// column is echoed unchanged by [`write_sentence`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    number: Regex,
}

impl Normalizer {
    /// Normalizer using [`DEFAULT_NUMBER_PATTERN`]
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_NUMBER_PATTERN)
    }

    /// Normalizer with a custom number pattern
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let number = Regex::new(pattern)
            .map_err(|e| EngineError::Config(format!("invalid number pattern: {e}")))?;
        Ok(Self { number })
    }

    /// `NUM` for numeric forms, the lowercased form otherwise
    pub fn normalize(&self, form: &str) -> String {
        if self.number.is_match(form) {
            NUMBER_FORM.to_string()
        } else {
            form.to_lowercase()
        }
    }
}

/// Streaming reader yielding one sentence per blank-line separated block
///
/// A block with an unparsable row or inconsistent ids yields an error and
/// reading resumes at the next block.
pub struct CorpusReader<R> {
    lines: Lines<R>,
    line: usize,
    normalizer: Normalizer,
}

impl<R: BufRead> CorpusReader<R> {
    /// Reader with the default normalizer
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self::with_normalizer(reader, Normalizer::new()?))
    }

    /// Reader with a caller-supplied normalizer
    pub fn with_normalizer(reader: R, normalizer: Normalizer) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            normalizer,
        }
    }
}

fn parse_row(normalizer: &Normalizer, columns: &[&str]) -> std::result::Result<Token, String> {
    let id = columns[0]
        .parse::<usize>()
        .map_err(|_| format!("id column '{}' is not a number", columns[0]))?;
    let form = columns[1];
    let gold_head = match columns[6] {
        "_" => None,
        head => Some(
            head.parse::<usize>()
                .map_err(|_| format!("head column '{head}' is not a number"))?,
        ),
    };
    let gold_label = match columns[7] {
        "_" => None,
        label => Some(label.to_string()),
    };

    let mut token = Token::new(id, form)
        .with_norm(normalizer.normalize(form))
        .with_tags(columns[2], columns[3], columns[4], columns[5]);
    token.gold_head = gold_head;
    token.gold_label = gold_label;
    Ok(token)
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut failure: Option<EngineError> = None;

        for line in self.lines.by_ref() {
            self.line += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            let line = line.trim_end_matches(['\r', '\n']);

            if line.trim().is_empty() {
                if tokens.is_empty() && failure.is_none() {
                    start = 0;
                    continue;
                }
                break;
            }
            if line.starts_with('#') {
                continue;
            }
            if start == 0 {
                start = self.line;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < MIN_COLUMNS {
                trace!(line = self.line, "skipping short row");
                continue;
            }
            if columns[0].contains(['-', '.']) {
                continue;
            }
            if failure.is_some() {
                continue;
            }
            match parse_row(&self.normalizer, &columns) {
                Ok(token) => tokens.push(token),
                Err(reason) => failure = Some(EngineError::corpus(self.line, reason)),
            }
        }

        if let Some(err) = failure {
            return Some(Err(err));
        }
        if tokens.is_empty() {
            return None;
        }
        Some(Sentence::new(tokens).map_err(|e| EngineError::corpus(start, e.to_string())))
    }
}

/// Read every sentence, failing on the first bad one
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    let sentences = CorpusReader::new(reader)?.collect::<Result<Vec<_>>>()?;
    debug!(sentences = sentences.len(), "corpus read");
    Ok(sentences)
}

/// Write one sentence with its predictions, followed by a blank line
pub fn write_sentence<W: Write>(writer: &mut W, sentence: &Sentence) -> Result<()> {
    for token in sentence.words() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t_\t_",
            token.id,
            token.form,
            token.lemma,
            token.cpos,
            token.pos,
            token.feats,
            token.pred_head,
            token.pred_label
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write a whole corpus
pub fn write_corpus<W: Write>(writer: &mut W, sentences: &[Sentence]) -> Result<()> {
    for sentence in sentences {
        write_sentence(writer, sentence)?;
    }
    Ok(())
}
