//! CLI command implementations

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader, LoadedCorpus};
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod oracle;
pub mod validate;
pub mod vocab;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay gold trees through the decoder and write the predictions
    Oracle(oracle::OracleArgs),

    /// List the relation labels of a corpus
    Vocab(vocab::VocabArgs),

    /// Check that a corpus can be read and its gold trees are well formed
    Validate(validate::ValidateArgs),
}

/// Flags shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        // a second initialisation in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }

    /// Configuration file contents, or defaults when none was given
    pub fn load_config(&self) -> Result<CliConfig> {
        match &self.config {
            Some(path) => CliConfig::from_file(path),
            None => Ok(CliConfig::default()),
        }
    }
}

/// Resolve `patterns` and load every matching file, with a progress bar
pub fn load_inputs(patterns: &[String], quiet: bool) -> Result<Vec<LoadedCorpus>> {
    let files = resolve_patterns(patterns)?;
    log::info!("Reading {} file(s)", files.len());

    let mut progress = ProgressReporter::new(quiet);
    progress.init_files(files.len() as u64);

    let mut corpora = Vec::with_capacity(files.len());
    for path in &files {
        let corpus = FileReader::load(path)?;
        progress.file_completed(&path.display().to_string(), corpus.sentences.len());
        corpora.push(corpus);
    }
    progress.finish();

    Ok(corpora)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_defaults_without_file() {
        let args = CommonArgs::default();
        let config = args.load_config().unwrap();
        assert!(!config.engine.single_root);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nsingle_root = true").unwrap();

        let args = CommonArgs {
            config: Some(file.path().to_path_buf()),
            ..CommonArgs::default()
        };
        assert!(args.load_config().unwrap().engine.single_root);
    }

    #[test]
    fn test_quiet_skips_logging() {
        let args = CommonArgs {
            quiet: true,
            verbose: 3,
            ..CommonArgs::default()
        };
        args.init_logging();
    }
}
