//! Batch orchestration for the covington dependency parser
//!
//! This crate drives the transition system in `covington-core` over whole
//! corpora: CoNLL reading and writing, sequential or rayon-parallel batch
//! decoding, training epochs, single-root repair and attachment scores.
//!
//! ```rust
//! use covington_engine::{read_corpus, AttachmentScores, DependencyParser};
//! use std::io::Cursor;
//!
//! let conll = "1\tShe\tshe\tPRON\tPRP\t_\t2\tnsubj\t_\t_\n\
//!              2\treads\tread\tVERB\tVBZ\t_\t0\troot\t_\t_\n";
//! let mut sentences = read_corpus(Cursor::new(conll)).unwrap();
//!
//! let parser = DependencyParser::builder()
//!     .labels_from(&sentences)
//!     .build()
//!     .unwrap();
//! let report = parser.parse_oracle(&mut sentences);
//!
//! assert!(report.is_clean());
//! assert_eq!(AttachmentScores::compute(&sentences).uas(), 1.0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod executor;
pub mod postprocess;
pub mod processor;
pub mod report;
pub mod trainer;

pub use config::{EngineConfig, TrainingConfig};
pub use corpus::{read_corpus, write_corpus, write_sentence, CorpusReader, Normalizer};
pub use error::{EngineError, Result};
pub use executor::{auto_select, ExecutionMode, Executor};
pub use postprocess::enforce_single_root;
pub use processor::{DependencyParser, DependencyParserBuilder};
pub use report::{AttachmentScores, BatchReport, EpochReport, SentenceFailure};
pub use trainer::Trainer;

// Re-export from core for convenience
pub use covington_core::{Scorer, Sentence, Token, TrainingPolicy, Vocabulary};
