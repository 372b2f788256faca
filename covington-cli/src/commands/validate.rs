//! Validate command implementation

use super::{load_inputs, CommonArgs};
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use covington_core::{AncestorTracker, Sentence, ROOT_ID};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();

        let corpora = load_inputs(&self.input, self.common.quiet)?;
        let mut problems = 0;

        for corpus in &corpora {
            let path = corpus.path.display();
            for error in &corpus.rejected {
                println!("✗ {path}: {error}");
            }
            let mut file_problems = corpus.rejected.len();

            let mut crossing = 0;
            for (index, sentence) in corpus.sentences.iter().enumerate() {
                if let Some(issue) = gold_tree_issue(sentence) {
                    println!("✗ {path}: sentence {}: {issue}", index + 1);
                    file_problems += 1;
                } else if !is_projective(sentence) {
                    crossing += 1;
                }
            }
            problems += file_problems;
            println!(
                "{} {path}: {} sentence(s), {} non-projective",
                if file_problems == 0 { "✓" } else { "!" },
                corpus.sentences.len(),
                crossing
            );
        }

        if problems > 0 {
            return Err(CliError::MalformedInput { count: problems }.into());
        }
        Ok(())
    }
}

/// Why the gold heads of `sentence` do not form a tree, if they don't
pub fn gold_tree_issue(sentence: &Sentence) -> Option<String> {
    let mut tracker = AncestorTracker::new(sentence.len());
    for token in sentence.words() {
        if token.gold_head.is_some() && token.gold_label.is_none() {
            return Some(format!("token {} has a gold head but no relation", token.id));
        }
        match token.gold_head {
            None | Some(ROOT_ID) => {}
            Some(head) if tracker.would_cycle(head, token.id) => {
                return Some(format!("gold arc {head} -> {} closes a cycle", token.id));
            }
            Some(head) => tracker.link(head, token.id),
        }
    }
    None
}

/// Whether no two gold arcs cross
pub fn is_projective(sentence: &Sentence) -> bool {
    let spans: Vec<(usize, usize)> = sentence
        .words()
        .iter()
        .filter_map(|t| t.gold_head.map(|h| (h.min(t.id), h.max(t.id))))
        .collect();

    spans.iter().enumerate().all(|(i, &(a, b))| {
        spans[i + 1..]
            .iter()
            .all(|&(c, d)| !((a < c && c < b && b < d) || (c < a && a < d && d < b)))
    })
}
