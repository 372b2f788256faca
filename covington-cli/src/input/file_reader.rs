//! Corpus file loading

use anyhow::{Context, Result};
use covington_core::Sentence;
use covington_engine::{CorpusReader, EngineError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Sentences read from one file, plus the blocks that were rejected
#[derive(Debug)]
pub struct LoadedCorpus {
    /// Source file
    pub path: PathBuf,
    /// Sentences that parsed
    pub sentences: Vec<Sentence>,
    /// Errors for blocks that did not
    pub rejected: Vec<EngineError>,
}

/// Reads CoNLL files from disk
pub struct FileReader;

impl FileReader {
    /// Open a corpus file for streaming
    pub fn open(path: &Path) -> Result<CorpusReader<BufReader<File>>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(CorpusReader::new(BufReader::new(file))?)
    }

    /// Read every sentence, keeping malformed blocks aside
    ///
    /// I/O errors abort the read; content errors do not.
    pub fn load(path: &Path) -> Result<LoadedCorpus> {
        let mut corpus = LoadedCorpus {
            path: path.to_path_buf(),
            sentences: Vec::new(),
            rejected: Vec::new(),
        };

        for item in Self::open(path)? {
            match item {
                Ok(sentence) => corpus.sentences.push(sentence),
                Err(EngineError::Io(e)) => {
                    return Err(e).with_context(|| format!("Failed to read file: {}", path.display()));
                }
                Err(e) => {
                    log::warn!("{}: {e}", path.display());
                    corpus.rejected.push(e);
                }
            }
        }
        Ok(corpus)
    }
}
