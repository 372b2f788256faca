//! `covington` command-line entry point

use clap::Parser;
use covington_cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().execute()
}
