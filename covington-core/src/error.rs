//! Core error types (deterministic only)
//!
//! Every error here is local to one sentence. Callers processing a batch skip
//! the affected sentence and carry on.

use thiserror::Error;

/// Errors raised while building or parsing a single sentence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input sentence is empty or its token ids are inconsistent
    #[error("malformed sentence: {reason}")]
    MalformedSentence {
        /// What was wrong with the token sequence
        reason: String,
    },

    /// A scorer or oracle proposed a move whose preconditions do not hold
    #[error("illegal move {mv} requested at step {step}: {reason}")]
    IllegalMove {
        /// Decoder step at which the move was proposed
        step: usize,
        /// Rendered move
        mv: String,
        /// Which precondition failed
        reason: String,
    },

    /// Adding the arc would close a directed cycle
    #[error("arc {head} -> {dependent} would create a cycle")]
    CycleRejected {
        /// Proposed head
        head: usize,
        /// Proposed dependent
        dependent: usize,
    },

    /// The dependent already has a head in the arc set
    #[error("token {dependent} already has head {existing_head}")]
    ArcSetConflict {
        /// Dependent that was assigned twice
        dependent: usize,
        /// Head it already has
        existing_head: usize,
    },

    /// Gold label is not part of the label vocabulary
    #[error("label '{0}' is not in the vocabulary")]
    UnknownLabel(String),

    /// Label id does not belong to the vocabulary in use
    #[error("label id {0} is out of range for the vocabulary")]
    UnknownLabelId(u32),

    /// Non-terminal configuration with no legal move
    #[error("no legal move at step {step} of a non-terminal configuration")]
    DeadEnd {
        /// Decoder step at which the dead end was found
        step: usize,
    },
}

impl ParseError {
    /// Shorthand for [`ParseError::MalformedSentence`]
    pub fn malformed(reason: impl Into<String>) -> Self {
        ParseError::MalformedSentence {
            reason: reason.into(),
        }
    }

    /// Whether this error signals a defect in a scorer or oracle rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            ParseError::MalformedSentence { .. } | ParseError::UnknownLabel(_)
        )
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, ParseError>;
