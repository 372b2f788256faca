//! Transition-based non-projective dependency parsing core
//!
//! This crate implements the list-based transition system that compares
//! every buffer front against every earlier token, which lets crossing
//! (non-projective) arcs be built with four moves: LeftArc, RightArc, NoArc
//! and Shift.
//!
//! # Architecture
//!
//! - **Model**: [`Token`], [`Sentence`], [`Vocabulary`]
//! - **State**: [`Configuration`] with its [`ArcSet`] and incremental
//!   [`AncestorTracker`] for O(1) cycle checks
//! - **Training signal**: [`Oracle`] / [`CovingtonOracle`]
//! - **Control loop**: [`Decoder`], driven by an external [`Scorer`] and,
//!   when training, an external [`Learner`]
//!
//! Nothing here performs I/O. Feature extraction, the learned model and
//! corpus formats live with the caller.
//!
//! # Example
//!
//! ```rust
//! use covington_core::{Decoder, OracleScorer, Sentence, Token, Vocabulary};
//!
//! let mut sentence = Sentence::new(vec![
//!     Token::new(1, "She").with_gold(2, "nsubj"),
//!     Token::new(2, "reads").with_gold(0, "root"),
//!     Token::new(3, "books").with_gold(2, "obj"),
//! ])
//! .unwrap();
//!
//! let vocab = Vocabulary::from_sentences([&sentence]);
//! let scorer = OracleScorer::new(&vocab);
//! Decoder::new(&vocab).decode(&mut sentence, &scorer).unwrap();
//!
//! assert_eq!(sentence.predicted_heads(), vec![2, 0, 2]);
//! ```

#![warn(missing_docs)]

pub mod ancestry;
pub mod arcs;
pub mod configuration;
pub mod decoder;
pub mod error;
pub mod moves;
pub mod oracle;
pub mod scorer;
pub mod sentence;
pub mod token;
pub mod vocabulary;

pub use ancestry::{AncestorTracker, TokenSet};
pub use arcs::{ArcSet, DependencyArc};
pub use configuration::{Configuration, Violation};
pub use decoder::{Decoder, ParseOutcome, TrainingPolicy};
pub use error::{ParseError, Result};
pub use moves::{Move, MoveKind, MoveSet};
pub use oracle::{CovingtonOracle, Oracle};
pub use scorer::{
    Learner, NoopLearner, OracleScorer, ScoredMove, Scorer, SignalRecorder, TrainingSignal,
};
pub use sentence::Sentence;
pub use token::{Token, ROOT_ID, ROOT_LABEL};
pub use vocabulary::{LabelId, Vocabulary};
