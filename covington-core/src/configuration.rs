//! Parser configuration and move application
//!
//! A configuration holds three ordered id regions and the arcs built so far:
//!
//! - `left`: processed tokens still to be compared with the buffer front;
//!   its last element is the left comparand `l`
//! - `deferred`: tokens already compared with the current buffer front
//! - `buffer`: tokens not yet introduced; its first element is `b`
//!
//! Every non-root token sits in exactly one region. Shift merges `deferred`,
//! restored to sentence order, and the buffer front back into `left`, so the
//! next `b` is compared against every earlier token, nearest first. When the
//! shifted token was the last one in the buffer no comparand remains and the
//! merged region is parked in `deferred` instead, which makes the
//! configuration terminal. A sentence of `n` words therefore takes exactly
//! `n` shifts plus `n(n-1)/2` comparisons.

use crate::ancestry::AncestorTracker;
use crate::arcs::ArcSet;
use crate::error::{ParseError, Result};
use crate::moves::{Move, MoveKind};
use crate::sentence::Sentence;
use crate::vocabulary::{LabelId, Vocabulary};
use std::collections::VecDeque;
use std::fmt;

/// Why a move is not legal in a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `left` is empty, so there is no `l`
    NoLeftComparand,
    /// `buffer` is empty, so there is no `b`
    NoBufferFront,
    /// `l` already has a head
    LeftHasHead,
    /// `b` already has a head
    BufferHasHead,
    /// The arc would close a cycle
    Cycle,
    /// Shift requires `left` to be exhausted
    LeftNotExhausted,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Violation::NoLeftComparand => "left is empty",
            Violation::NoBufferFront => "buffer is empty",
            Violation::LeftHasHead => "l already has a head",
            Violation::BufferHasHead => "b already has a head",
            Violation::Cycle => "arc would create a cycle",
            Violation::LeftNotExhausted => "left is not exhausted",
        };
        f.write_str(text)
    }
}

/// Mid-parse state for one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    words: usize,
    left: Vec<usize>,
    deferred: Vec<usize>,
    buffer: VecDeque<usize>,
    arcs: ArcSet,
    ancestry: AncestorTracker,
    steps: usize,
}

impl Configuration {
    /// Initial configuration for a sentence of `words` real tokens
    pub fn new(words: usize) -> Self {
        Self {
            words,
            left: Vec::with_capacity(words),
            deferred: Vec::with_capacity(words),
            buffer: (1..=words).collect(),
            arcs: ArcSet::new(words),
            ancestry: AncestorTracker::new(words),
            steps: 0,
        }
    }

    /// Initial configuration for a sentence
    pub fn initial(sentence: &Sentence) -> Self {
        Self::new(sentence.len())
    }

    /// Upper bound on moves for a sentence of `words` tokens
    pub fn move_bound(words: usize) -> usize {
        words * (words + 1) / 2
    }

    /// Number of real tokens
    pub fn words(&self) -> usize {
        self.words
    }

    /// Current left comparand
    pub fn l(&self) -> Option<usize> {
        self.left.last().copied()
    }

    /// Current buffer front
    pub fn b(&self) -> Option<usize> {
        self.buffer.front().copied()
    }

    /// Processed region still awaiting comparison
    pub fn left(&self) -> &[usize] {
        &self.left
    }

    /// Tokens set aside during the current comparison pass
    pub fn deferred(&self) -> &[usize] {
        &self.deferred
    }

    /// Tokens not yet introduced
    pub fn buffer(&self) -> &VecDeque<usize> {
        &self.buffer
    }

    /// Arcs built so far
    pub fn arcs(&self) -> &ArcSet {
        &self.arcs
    }

    /// Ancestor closure of the current arcs
    pub fn ancestry(&self) -> &AncestorTracker {
        &self.ancestry
    }

    /// Moves applied since the initial configuration
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether all comparisons are exhausted
    pub fn is_terminal(&self) -> bool {
        self.buffer.is_empty() && self.left.is_empty()
    }

    /// First failed precondition of a move, if any
    pub fn violation(&self, mv: &Move) -> Option<Violation> {
        match mv.kind() {
            MoveKind::LeftArc => {
                let (l, b) = match self.comparands() {
                    Ok(pair) => pair,
                    Err(v) => return Some(v),
                };
                if self.arcs.has_head(l) {
                    Some(Violation::LeftHasHead)
                } else if self.ancestry.would_cycle(b, l) {
                    Some(Violation::Cycle)
                } else {
                    None
                }
            }
            MoveKind::RightArc => {
                let (l, b) = match self.comparands() {
                    Ok(pair) => pair,
                    Err(v) => return Some(v),
                };
                if self.arcs.has_head(b) {
                    Some(Violation::BufferHasHead)
                } else if self.ancestry.would_cycle(l, b) {
                    Some(Violation::Cycle)
                } else {
                    None
                }
            }
            MoveKind::NoArc => self.l().is_none().then_some(Violation::NoLeftComparand),
            MoveKind::Shift => {
                if !self.left.is_empty() {
                    Some(Violation::LeftNotExhausted)
                } else if self.buffer.is_empty() {
                    Some(Violation::NoBufferFront)
                } else {
                    None
                }
            }
        }
    }

    fn comparands(&self) -> std::result::Result<(usize, usize), Violation> {
        let l = self.l().ok_or(Violation::NoLeftComparand)?;
        let b = self.b().ok_or(Violation::NoBufferFront)?;
        Ok((l, b))
    }

    /// Whether a move's preconditions hold
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.violation(mv).is_none()
    }

    /// Legal moves in tie-break order: LeftArc, RightArc, NoArc, Shift,
    /// arc moves by label order
    pub fn legal_moves(&self, vocab: &Vocabulary) -> Vec<Move> {
        let mut moves = Vec::with_capacity(2 * vocab.len() + 2);
        let probe = vocab.ids().next();

        if let Some(label) = probe {
            if self.is_legal(&Move::LeftArc(label)) {
                moves.extend(vocab.ids().map(Move::LeftArc));
            }
            if self.is_legal(&Move::RightArc(label)) {
                moves.extend(vocab.ids().map(Move::RightArc));
            }
        }
        if self.is_legal(&Move::NoArc) {
            moves.push(Move::NoArc);
        }
        if self.is_legal(&Move::Shift) {
            moves.push(Move::Shift);
        }
        moves
    }

    /// Apply a move, consuming this configuration
    pub fn apply(mut self, mv: Move) -> Result<Self> {
        if let Some(violation) = self.violation(&mv) {
            return Err(ParseError::IllegalMove {
                step: self.steps,
                mv: mv.to_string(),
                reason: violation.to_string(),
            });
        }

        match mv {
            Move::LeftArc(label) => {
                let (l, b) = self.pair_for(mv)?;
                self.link(b, l, label)?;
                self.set_aside();
            }
            Move::RightArc(label) => {
                let (l, b) = self.pair_for(mv)?;
                self.link(l, b, label)?;
                self.set_aside();
            }
            Move::NoArc => self.set_aside(),
            Move::Shift => self.shift(mv)?,
        }

        self.steps += 1;
        Ok(self)
    }

    /// Configuration reached by a move, leaving this one untouched
    pub fn successor(&self, mv: Move) -> Result<Self> {
        self.clone().apply(mv)
    }

    fn pair_for(&self, mv: Move) -> Result<(usize, usize)> {
        self.comparands().map_err(|v| ParseError::IllegalMove {
            step: self.steps,
            mv: mv.to_string(),
            reason: v.to_string(),
        })
    }

    fn link(&mut self, head: usize, dependent: usize, label: LabelId) -> Result<()> {
        if self.ancestry.would_cycle(head, dependent) {
            return Err(ParseError::CycleRejected { head, dependent });
        }
        self.arcs.insert(head, dependent, label)?;
        self.ancestry.link(head, dependent);
        Ok(())
    }

    fn set_aside(&mut self) {
        if let Some(l) = self.left.pop() {
            self.deferred.push(l);
        }
    }

    fn shift(&mut self, mv: Move) -> Result<()> {
        let b = self.buffer.pop_front().ok_or_else(|| ParseError::IllegalMove {
            step: self.steps,
            mv: mv.to_string(),
            reason: Violation::NoBufferFront.to_string(),
        })?;
        // deferred was filled from the tail of left, so it runs right to left
        self.deferred.reverse();
        self.deferred.push(b);
        if !self.buffer.is_empty() {
            std::mem::swap(&mut self.left, &mut self.deferred);
        }
        Ok(())
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |id: Option<usize>| id.map_or_else(|| "-".to_string(), |i| i.to_string());
        write!(
            f,
            "l={} b={} left={:?} deferred={:?} buffer={:?} arcs={}",
            show(self.l()),
            show(self.b()),
            self.left,
            self.deferred,
            self.buffer,
            self.arcs.len()
        )
    }
}
