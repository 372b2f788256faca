//! The four structural moves of the transition system

use crate::error::Result;
use crate::vocabulary::{LabelId, Vocabulary};
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A structural move; arc moves carry their relation label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    /// `b` becomes the head of `l`, then `l` is set aside
    LeftArc(LabelId),
    /// `l` becomes the head of `b`, then `l` is set aside
    RightArc(LabelId),
    /// `l` is set aside without an arc
    NoArc,
    /// `b` joins the processed region once `left` is exhausted
    Shift,
}

/// Move family without a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    /// See [`Move::LeftArc`]
    LeftArc,
    /// See [`Move::RightArc`]
    RightArc,
    /// See [`Move::NoArc`]
    NoArc,
    /// See [`Move::Shift`]
    Shift,
}

/// Zero-cost sets are almost always a single move
pub type MoveSet = SmallVec<[Move; 2]>;

impl Move {
    /// Family of this move
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::LeftArc(_) => MoveKind::LeftArc,
            Move::RightArc(_) => MoveKind::RightArc,
            Move::NoArc => MoveKind::NoArc,
            Move::Shift => MoveKind::Shift,
        }
    }

    /// Label of an arc move
    pub fn label(&self) -> Option<LabelId> {
        match self {
            Move::LeftArc(label) | Move::RightArc(label) => Some(*label),
            Move::NoArc | Move::Shift => None,
        }
    }

    /// Whether this move creates an arc
    pub fn is_arc(&self) -> bool {
        self.label().is_some()
    }

    /// Deterministic tie-break key: family first, then label order
    pub fn priority(&self) -> (MoveKind, usize) {
        (self.kind(), self.label().map_or(0, LabelId::index))
    }

    /// Render with the label text, e.g. `LeftArc(nsubj)`
    pub fn describe(&self, vocab: &Vocabulary) -> Result<String> {
        Ok(match self {
            Move::LeftArc(label) => format!("LeftArc({})", vocab.label(*label)?),
            Move::RightArc(label) => format!("RightArc({})", vocab.label(*label)?),
            Move::NoArc => "NoArc".to_string(),
            Move::Shift => "Shift".to_string(),
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::LeftArc(label) => write!(f, "LeftArc({label})"),
            Move::RightArc(label) => write!(f, "RightArc({label})"),
            Move::NoArc => f.write_str("NoArc"),
            Move::Shift => f.write_str("Shift"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_orders_families_then_labels() {
        let vocab = Vocabulary::from_labels(["nsubj", "obj"]);
        let nsubj = vocab.id("nsubj").unwrap();
        let obj = vocab.id("obj").unwrap();

        let mut moves = vec![
            Move::Shift,
            Move::RightArc(nsubj),
            Move::NoArc,
            Move::LeftArc(obj),
            Move::LeftArc(nsubj),
        ];
        moves.sort_by_key(Move::priority);
        assert_eq!(
            moves,
            vec![
                Move::LeftArc(nsubj),
                Move::LeftArc(obj),
                Move::RightArc(nsubj),
                Move::NoArc,
                Move::Shift,
            ]
        );
    }

    #[test]
    fn test_describe_and_display() {
        let vocab = Vocabulary::from_labels(["det"]);
        let det = vocab.id("det").unwrap();
        assert_eq!(Move::LeftArc(det).describe(&vocab).unwrap(), "LeftArc(det)");
        assert_eq!(Move::RightArc(det).to_string(), "RightArc(#0)");
        assert_eq!(Move::Shift.describe(&vocab).unwrap(), "Shift");
        assert!(!Move::NoArc.is_arc());
        assert_eq!(Move::RightArc(det).label(), Some(det));
    }
}
