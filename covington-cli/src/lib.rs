//! Covington CLI library
//!
//! This library provides the command-line interface for the covington
//! dependency parser: oracle replay over CoNLL corpora, label inventories
//! and corpus validation.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

use clap::Parser;
use commands::Commands;

/// Top-level argument parser
#[derive(Debug, Parser)]
#[command(name = "covington", version, about = "Non-projective dependency parsing tools")]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Run the selected command
    pub fn execute(self) -> CliResult<()> {
        match self.command {
            Commands::Oracle(args) => args.execute(),
            Commands::Vocab(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_oracle_flags() {
        let cli = Cli::try_parse_from([
            "covington",
            "oracle",
            "-i",
            "train.conllu",
            "--single-root",
            "--threads",
            "2",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Oracle(args) => {
                assert_eq!(args.input, vec!["train.conllu".to_string()]);
                assert!(args.single_root);
                assert_eq!(args.threads, Some(2));
                assert_eq!(args.common.verbose, 2);
            }
            other => panic!("expected oracle, got {other:?}"),
        }
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["covington", "vocab"]).is_err());
    }
}
